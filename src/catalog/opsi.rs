//! OCI Operations Insights models
//!
//! Two polymorphic families: host insights keyed by `entitySource` and
//! host configuration metric groups keyed by `metricName`.

use crate::schema::{Discriminator, FieldDef, ModelDescriptor, TypeTag};

const HOST_ENTITY_SOURCES: &[&str] = &[
    "MACS_MANAGED_EXTERNAL_HOST",
    "EM_MANAGED_EXTERNAL_HOST",
    "MACS_MANAGED_CLOUD_HOST",
    "PE_COMANAGED_HOST",
];

const RESOURCE_STATUSES: &[&str] = &["DISABLED", "ENABLED", "TERMINATED"];

const LIFECYCLE_STATES: &[&str] = &[
    "CREATING",
    "UPDATING",
    "ACTIVE",
    "DELETING",
    "DELETED",
    "FAILED",
    "NEEDS_ATTENTION",
];

const PLATFORM_TYPES: &[&str] = &["LINUX", "SOLARIS", "SUNOS", "ZLINUX", "WINDOWS", "AIX"];

const METRIC_NAMES: &[&str] = &[
    "HOST_PRODUCT",
    "HOST_RESOURCE_ALLOCATION",
    "HOST_MEMORY_CONFIGURATION",
    "HOST_HARDWARE_CONFIGURATION",
    "HOST_CPU_HARDWARE_CONFIGURATION",
    "HOST_NETWORK_CONFIGURATION",
    "HOST_ENTITES",
];

fn platform_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::lenient_enum("platform_type", "platformType", PLATFORM_TYPES),
        FieldDef::string("platform_version", "platformVersion"),
    ]
}

fn host_insight() -> ModelDescriptor {
    ModelDescriptor::new(
        "HostInsight",
        vec![
            FieldDef::lenient_enum("entity_source", "entitySource", HOST_ENTITY_SOURCES),
            FieldDef::string("id", "id"),
            FieldDef::string("compartment_id", "compartmentId"),
            FieldDef::string("host_name", "hostName"),
            FieldDef::string("host_display_name", "hostDisplayName"),
            FieldDef::string("host_type", "hostType"),
            FieldDef::int("processor_count", "processorCount"),
            FieldDef::map("freeform_tags", "freeformTags", TypeTag::String),
            FieldDef::map("defined_tags", "definedTags", TypeTag::map(TypeTag::Object)),
            FieldDef::map("system_tags", "systemTags", TypeTag::map(TypeTag::Object)),
            FieldDef::lenient_enum("status", "status", RESOURCE_STATUSES),
            FieldDef::datetime("time_created", "timeCreated"),
            FieldDef::datetime("time_updated", "timeUpdated"),
            FieldDef::lenient_enum("lifecycle_state", "lifecycleState", LIFECYCLE_STATES),
            FieldDef::string("lifecycle_details", "lifecycleDetails"),
        ],
    )
    .with_description("Host monitored by Operations Insights")
    .with_discriminator(Discriminator::new(
        "entity_source",
        &[
            ("MACS_MANAGED_EXTERNAL_HOST", "MacsManagedExternalHostInsight"),
            ("EM_MANAGED_EXTERNAL_HOST", "EmManagedExternalHostInsight"),
            ("MACS_MANAGED_CLOUD_HOST", "MacsManagedCloudHostInsight"),
            ("PE_COMANAGED_HOST", "PeComanagedHostInsight"),
        ],
    ))
}

fn host_configuration_metric_group() -> ModelDescriptor {
    ModelDescriptor::new(
        "HostConfigurationMetricGroup",
        vec![
            FieldDef::lenient_enum("metric_name", "metricName", METRIC_NAMES),
            FieldDef::datetime("time_collected", "timeCollected"),
        ],
    )
    .with_discriminator(Discriminator::new(
        "metric_name",
        &[
            ("HOST_PRODUCT", "HostProduct"),
            ("HOST_RESOURCE_ALLOCATION", "HostResourceAllocation"),
            ("HOST_MEMORY_CONFIGURATION", "HostMemoryConfiguration"),
            ("HOST_CPU_HARDWARE_CONFIGURATION", "HostCpuHardwareConfiguration"),
            ("HOST_NETWORK_CONFIGURATION", "HostNetworkConfiguration"),
        ],
    ))
}

pub fn descriptors() -> Vec<ModelDescriptor> {
    let host = host_insight();
    let metric = host_configuration_metric_group();

    let mut macs_external = vec![
        FieldDef::string("management_agent_id", "managementAgentId"),
        FieldDef::string("platform_name", "platformName"),
    ];
    macs_external.extend(platform_fields());

    let mut macs_cloud = vec![
        FieldDef::string("compute_id", "computeId"),
        FieldDef::string("management_agent_id", "managementAgentId"),
        FieldDef::string("platform_name", "platformName"),
    ];
    macs_cloud.extend(platform_fields());

    let mut em_external = vec![
        FieldDef::string("enterprise_manager_identifier", "enterpriseManagerIdentifier"),
        FieldDef::string("enterprise_manager_entity_name", "enterpriseManagerEntityName"),
        FieldDef::string("enterprise_manager_entity_type", "enterpriseManagerEntityType"),
        FieldDef::string(
            "enterprise_manager_entity_identifier",
            "enterpriseManagerEntityIdentifier",
        ),
        FieldDef::string(
            "enterprise_manager_entity_display_name",
            "enterpriseManagerEntityDisplayName",
        ),
        FieldDef::string("enterprise_manager_bridge_id", "enterpriseManagerBridgeId"),
        FieldDef::string("exadata_insight_id", "exadataInsightId"),
    ];
    em_external.extend(platform_fields());

    let mut pe_comanaged = vec![
        FieldDef::string("opsi_private_endpoint_id", "opsiPrivateEndpointId"),
        FieldDef::string("compute_id", "computeId"),
        FieldDef::string("platform_name", "platformName"),
    ];
    pe_comanaged.extend(platform_fields());

    vec![
        ModelDescriptor::subtype_of(&host, "MacsManagedExternalHostInsight", macs_external),
        ModelDescriptor::subtype_of(&host, "MacsManagedCloudHostInsight", macs_cloud),
        ModelDescriptor::subtype_of(&host, "EmManagedExternalHostInsight", em_external),
        ModelDescriptor::subtype_of(&host, "PeComanagedHostInsight", pe_comanaged),
        host,
        ModelDescriptor::new(
            "HostInsightCollection",
            vec![FieldDef::list("items", "items", TypeTag::model("HostInsight"))],
        ),
        ModelDescriptor::subtype_of(
            &metric,
            "HostProduct",
            vec![
                FieldDef::string("vendor", "vendor"),
                FieldDef::string("name", "name"),
                FieldDef::string("version", "version"),
            ],
        ),
        ModelDescriptor::subtype_of(
            &metric,
            "HostResourceAllocation",
            vec![
                FieldDef::int("total_cpus", "totalCpus"),
                FieldDef::float("total_memory_in_gbs", "totalMemoryInGBs"),
            ],
        ),
        ModelDescriptor::subtype_of(
            &metric,
            "HostMemoryConfiguration",
            vec![
                FieldDef::float("page_size_in_kb", "pageSizeInKB"),
                FieldDef::float("page_tables_in_kb", "pageTablesInKB"),
                FieldDef::float("swap_total_in_kb", "swapTotalInKB"),
                FieldDef::float("huge_page_size_in_kb", "hugePageSizeInKB"),
                FieldDef::int("huge_pages_total", "hugePagesTotal"),
                FieldDef::int("huge_pages_free", "hugePagesFree"),
                FieldDef::int("huge_pages_reserved", "hugePagesReserved"),
            ],
        ),
        ModelDescriptor::subtype_of(
            &metric,
            "HostCpuHardwareConfiguration",
            vec![
                FieldDef::int("total_cpus", "totalCpus"),
                FieldDef::string("vendor", "vendor"),
                FieldDef::float("frequency_in_mhz", "frequencyInMhz"),
                FieldDef::float("cache_in_mb", "cacheInMB"),
                FieldDef::string("cpu_family", "cpuFamily"),
                FieldDef::string("model_name", "modelName"),
                FieldDef::int("threads_per_socket", "threadsPerSocket"),
                FieldDef::bool("is_hyper_threading_enabled", "isHyperThreadingEnabled"),
            ],
        ),
        ModelDescriptor::subtype_of(
            &metric,
            "HostNetworkConfiguration",
            vec![
                FieldDef::string("interface_name", "interfaceName"),
                FieldDef::string("ip_address", "ipAddress"),
                FieldDef::string("mac_address", "macAddress"),
            ],
        ),
        metric,
        ModelDescriptor::new(
            "HostConfigurationSummary",
            vec![
                FieldDef::string("host_insight_id", "hostInsightId"),
                FieldDef::lenient_enum("entity_source", "entitySource", HOST_ENTITY_SOURCES),
                FieldDef::string("host_name", "hostName"),
                FieldDef::lenient_enum("platform_type", "platformType", PLATFORM_TYPES),
                FieldDef::list(
                    "metric_groups",
                    "metricGroups",
                    TypeTag::model("HostConfigurationMetricGroup"),
                ),
            ],
        ),
    ]
}
