//! Azure Resource Manager role management models
//!
//! Role assignments and role definitions under the `Microsoft.Authorization`
//! provider, with their list envelopes.

use crate::schema::{FieldDef, ModelDescriptor, TypeTag};

use super::endpoint::ResourceEndpoint;

pub const PROVIDER: &str = "Microsoft.Authorization";

pub const ROLE_ASSIGNMENTS: ResourceEndpoint = ResourceEndpoint {
    provider: PROVIDER,
    service: "roleAssignments",
    api_version: "2022-04-01",
    model: "RoleAssignment",
    list_model: "RoleAssignmentListResult",
};

pub const ROLE_DEFINITIONS: ResourceEndpoint = ResourceEndpoint {
    provider: PROVIDER,
    service: "roleDefinitions",
    api_version: "2022-04-01",
    model: "RoleDefinition",
    list_model: "RoleDefinitionListResult",
};

const PRINCIPAL_TYPES: &[&str] = &["User", "Group", "ServicePrincipal", "ForeignGroup", "Device"];

fn resource_envelope(name: &str, properties: &str) -> ModelDescriptor {
    ModelDescriptor::new(
        name,
        vec![
            FieldDef::string("id", "id"),
            FieldDef::string("name", "name"),
            FieldDef::string("type", "type"),
            FieldDef::model("properties", "properties", properties),
        ],
    )
}

fn list_result(name: &str, item: &str) -> ModelDescriptor {
    ModelDescriptor::new(
        name,
        vec![
            FieldDef::list("value", "value", TypeTag::model(item)),
            FieldDef::string("next_link", "nextLink"),
        ],
    )
}

pub fn descriptors() -> Vec<ModelDescriptor> {
    vec![
        resource_envelope("RoleAssignment", "RoleAssignmentProperties"),
        ModelDescriptor::new(
            "RoleAssignmentProperties",
            vec![
                FieldDef::string("scope", "scope"),
                FieldDef::string("role_definition_id", "roleDefinitionId"),
                FieldDef::string("principal_id", "principalId"),
                FieldDef::lenient_enum("principal_type", "principalType", PRINCIPAL_TYPES),
                FieldDef::string("description", "description"),
                FieldDef::string("condition", "condition"),
                FieldDef::string("condition_version", "conditionVersion"),
                FieldDef::datetime("created_on", "createdOn"),
                FieldDef::datetime("updated_on", "updatedOn"),
                FieldDef::string("created_by", "createdBy"),
                FieldDef::string("updated_by", "updatedBy"),
                FieldDef::string(
                    "delegated_managed_identity_resource_id",
                    "delegatedManagedIdentityResourceId",
                ),
            ],
        ),
        list_result("RoleAssignmentListResult", "RoleAssignment"),
        resource_envelope("RoleDefinition", "RoleDefinitionProperties"),
        ModelDescriptor::new(
            "RoleDefinitionProperties",
            vec![
                FieldDef::string("role_name", "roleName"),
                FieldDef::string("description", "description"),
                FieldDef::lenient_enum("role_type", "type", &["BuiltInRole", "CustomRole"]),
                FieldDef::list("permissions", "permissions", TypeTag::model("Permission")),
                FieldDef::list("assignable_scopes", "assignableScopes", TypeTag::String),
                FieldDef::datetime("created_on", "createdOn"),
                FieldDef::datetime("updated_on", "updatedOn"),
                FieldDef::string("created_by", "createdBy"),
                FieldDef::string("updated_by", "updatedBy"),
            ],
        ),
        ModelDescriptor::new(
            "Permission",
            vec![
                FieldDef::list("actions", "actions", TypeTag::String),
                FieldDef::list("not_actions", "notActions", TypeTag::String),
                FieldDef::list("data_actions", "dataActions", TypeTag::String),
                FieldDef::list("not_data_actions", "notDataActions", TypeTag::String),
            ],
        ),
        list_result("RoleDefinitionListResult", "RoleDefinition"),
    ]
}
