//! OCI Key Management models
//!
//! Response models degrade unknown enum values; request details that select
//! an algorithm or message type reject them.

use serde_json::json;

use crate::schema::{FieldDef, ModelDescriptor, TypeTag};

const ENCRYPTION_ALGORITHMS: &[&str] = &["AES_256_GCM", "RSA_OAEP_SHA_1", "RSA_OAEP_SHA_256"];

const SIGNING_ALGORITHMS: &[&str] = &[
    "SHA_224_RSA_PKCS_PSS",
    "SHA_256_RSA_PKCS_PSS",
    "SHA_384_RSA_PKCS_PSS",
    "SHA_512_RSA_PKCS_PSS",
    "SHA_224_RSA_PKCS1_V1_5",
    "SHA_256_RSA_PKCS1_V1_5",
    "SHA_384_RSA_PKCS1_V1_5",
    "SHA_512_RSA_PKCS1_V1_5",
    "ECDSA_SHA_256",
    "ECDSA_SHA_384",
    "ECDSA_SHA_512",
];

const MESSAGE_TYPES: &[&str] = &["RAW", "DIGEST"];

const KEY_LIFECYCLE_STATES: &[&str] = &[
    "CREATING",
    "ENABLING",
    "ENABLED",
    "DISABLING",
    "DISABLED",
    "DELETING",
    "DELETED",
    "PENDING_DELETION",
    "SCHEDULING_DELETION",
    "CANCELLING_DELETION",
    "UPDATING",
    "BACKUP_IN_PROGRESS",
    "RESTORING",
];

const VAULT_LIFECYCLE_STATES: &[&str] = &[
    "CREATING",
    "ACTIVE",
    "DELETING",
    "DELETED",
    "PENDING_DELETION",
    "SCHEDULING_DELETION",
    "CANCELLING_DELETION",
    "UPDATING",
    "BACKUP_IN_PROGRESS",
    "RESTORING",
];

const CURVE_IDS: &[&str] = &["NIST_P256", "NIST_P384", "NIST_P521"];

const PROTECTION_MODES: &[&str] = &["HSM", "SOFTWARE", "EXTERNAL"];

fn defined_tags() -> FieldDef {
    FieldDef::map("defined_tags", "definedTags", TypeTag::map(TypeTag::Object))
}

fn freeform_tags() -> FieldDef {
    FieldDef::map("freeform_tags", "freeformTags", TypeTag::String)
}

fn string_map(name: &str, wire_key: &str) -> FieldDef {
    FieldDef::map(name, wire_key, TypeTag::String)
}

pub fn descriptors() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new(
            "EncryptedData",
            vec![
                FieldDef::string("ciphertext", "ciphertext"),
                FieldDef::string("key_id", "keyId"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::lenient_enum(
                    "encryption_algorithm",
                    "encryptionAlgorithm",
                    ENCRYPTION_ALGORITHMS,
                ),
            ],
        )
        .with_description("Result of an encrypt call"),
        ModelDescriptor::new(
            "EncryptDataDetails",
            vec![
                string_map("associated_data", "associatedData"),
                FieldDef::string("key_id", "keyId"),
                string_map("logging_context", "loggingContext"),
                FieldDef::string("plaintext", "plaintext"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::strict_enum(
                    "encryption_algorithm",
                    "encryptionAlgorithm",
                    ENCRYPTION_ALGORITHMS,
                )
                .with_default(json!("AES_256_GCM")),
            ],
        ),
        ModelDescriptor::new(
            "DecryptDataDetails",
            vec![
                string_map("associated_data", "associatedData"),
                FieldDef::string("ciphertext", "ciphertext"),
                FieldDef::string("key_id", "keyId"),
                string_map("logging_context", "loggingContext"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::strict_enum(
                    "encryption_algorithm",
                    "encryptionAlgorithm",
                    ENCRYPTION_ALGORITHMS,
                )
                .with_default(json!("AES_256_GCM")),
            ],
        ),
        ModelDescriptor::new(
            "DecryptedData",
            vec![
                FieldDef::string("plaintext", "plaintext"),
                FieldDef::string("plaintext_checksum", "plaintextChecksum"),
                FieldDef::string("key_id", "keyId"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::lenient_enum(
                    "encryption_algorithm",
                    "encryptionAlgorithm",
                    ENCRYPTION_ALGORITHMS,
                ),
            ],
        ),
        ModelDescriptor::new(
            "SignDataDetails",
            vec![
                FieldDef::string("message", "message"),
                FieldDef::string("key_id", "keyId"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::strict_enum("message_type", "messageType", MESSAGE_TYPES)
                    .with_default(json!("RAW")),
                FieldDef::strict_enum("signing_algorithm", "signingAlgorithm", SIGNING_ALGORITHMS),
                string_map("logging_context", "loggingContext"),
            ],
        ),
        ModelDescriptor::new(
            "SignedData",
            vec![
                FieldDef::string("key_id", "keyId"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::string("signature", "signature"),
                FieldDef::lenient_enum("signing_algorithm", "signingAlgorithm", SIGNING_ALGORITHMS),
            ],
        ),
        ModelDescriptor::new(
            "VerifyDataDetails",
            vec![
                FieldDef::string("key_id", "keyId"),
                FieldDef::string("key_version_id", "keyVersionId"),
                FieldDef::string("signature", "signature"),
                FieldDef::string("message", "message"),
                FieldDef::strict_enum("signing_algorithm", "signingAlgorithm", SIGNING_ALGORITHMS),
                FieldDef::strict_enum("message_type", "messageType", MESSAGE_TYPES)
                    .with_default(json!("RAW")),
                string_map("logging_context", "loggingContext"),
            ],
        ),
        ModelDescriptor::new(
            "VerifiedData",
            vec![FieldDef::bool("is_signature_valid", "isSignatureValid")],
        ),
        ModelDescriptor::new(
            "KeyShape",
            vec![
                FieldDef::lenient_enum("algorithm", "algorithm", &["AES", "RSA", "ECDSA"]),
                FieldDef::int("length", "length"),
                FieldDef::lenient_enum("curve_id", "curveId", CURVE_IDS),
            ],
        ),
        ModelDescriptor::new(
            "GenerateKeyDetails",
            vec![
                string_map("associated_data", "associatedData"),
                FieldDef::bool("include_plaintext_key", "includePlaintextKey")
                    .with_default(json!(false)),
                FieldDef::string("key_id", "keyId"),
                FieldDef::model("key_shape", "keyShape", "KeyShape"),
                string_map("logging_context", "loggingContext"),
            ],
        ),
        ModelDescriptor::new(
            "GeneratedKey",
            vec![
                FieldDef::string("ciphertext", "ciphertext"),
                FieldDef::string("plaintext", "plaintext"),
                FieldDef::string("plaintext_checksum", "plaintextChecksum"),
            ],
        ),
        ModelDescriptor::new(
            "Key",
            vec![
                FieldDef::string("compartment_id", "compartmentId"),
                FieldDef::string("current_key_version", "currentKeyVersion"),
                defined_tags(),
                FieldDef::string("display_name", "displayName"),
                freeform_tags(),
                FieldDef::string("id", "id"),
                FieldDef::model("key_shape", "keyShape", "KeyShape"),
                FieldDef::lenient_enum("protection_mode", "protectionMode", PROTECTION_MODES),
                FieldDef::lenient_enum("lifecycle_state", "lifecycleState", KEY_LIFECYCLE_STATES),
                FieldDef::datetime("time_created", "timeCreated"),
                FieldDef::datetime("time_of_deletion", "timeOfDeletion"),
                FieldDef::string("vault_id", "vaultId"),
                FieldDef::string("restored_from_key_id", "restoredFromKeyId"),
                FieldDef::bool("is_primary", "isPrimary"),
            ],
        ),
        ModelDescriptor::new(
            "KeyVersion",
            vec![
                FieldDef::string("compartment_id", "compartmentId"),
                FieldDef::string("id", "id"),
                FieldDef::string("key_id", "keyId"),
                FieldDef::string("public_key", "publicKey"),
                FieldDef::lenient_enum("lifecycle_state", "lifecycleState", KEY_LIFECYCLE_STATES),
                FieldDef::lenient_enum("origin", "origin", &["INTERNAL", "EXTERNAL"]),
                FieldDef::datetime("time_created", "timeCreated"),
                FieldDef::datetime("time_of_deletion", "timeOfDeletion"),
                FieldDef::string("vault_id", "vaultId"),
                FieldDef::bool("is_primary", "isPrimary"),
            ],
        ),
        ModelDescriptor::new(
            "Vault",
            vec![
                FieldDef::string("compartment_id", "compartmentId"),
                FieldDef::string("crypto_endpoint", "cryptoEndpoint"),
                defined_tags(),
                FieldDef::string("display_name", "displayName"),
                freeform_tags(),
                FieldDef::string("id", "id"),
                FieldDef::lenient_enum("lifecycle_state", "lifecycleState", VAULT_LIFECYCLE_STATES),
                FieldDef::string("management_endpoint", "managementEndpoint"),
                FieldDef::datetime("time_created", "timeCreated"),
                FieldDef::datetime("time_of_deletion", "timeOfDeletion"),
                FieldDef::lenient_enum("vault_type", "vaultType", &["VIRTUAL_PRIVATE", "DEFAULT"]),
                FieldDef::string("wrappingkey_id", "wrappingkeyId"),
                FieldDef::bool("is_primary", "isPrimary"),
            ],
        ),
    ]
}
