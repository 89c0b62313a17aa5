#[cfg(test)]
mod tests {
    use crate::projection::{derive_groups, project, GroupDimension, LINUX_GROUP};
    use crate::record::{InstanceConfiguration, InstanceRecord, InstanceState};
    use crate::sink::{InMemoryInventory, InventorySink};

    fn record(
        resource_id: &str,
        account_id: &str,
        region: &str,
        state: &str,
        platform: Option<&str>,
    ) -> InstanceRecord {
        InstanceRecord {
            resource_id: resource_id.to_string(),
            account_id: account_id.to_string(),
            aws_region: region.to_string(),
            availability_zone: None,
            configuration: InstanceConfiguration {
                state: InstanceState {
                    name: state.to_string(),
                },
                instance_type: None,
                public_dns_name: None,
                private_ip_address: None,
                private_dns_name: None,
                platform: platform.map(String::from),
            },
            tags: None,
        }
    }

    #[test]
    fn group_names_per_dimension() {
        let rec = record("i-1", "111", "us-east-1", "running", None);

        assert_eq!(GroupDimension::Account.group_name(&rec), "111");
        assert_eq!(GroupDimension::Region.group_name(&rec), "us_east_1");
        assert_eq!(GroupDimension::State.group_name(&rec), "running");
        assert_eq!(GroupDimension::Platform.group_name(&rec), LINUX_GROUP);

        let win = record("i-2", "111", "us-east-1", "running", Some("windows"));
        assert_eq!(GroupDimension::Platform.group_name(&win), "windows");
    }

    #[test]
    fn group_set_always_contains_linux() {
        assert_eq!(derive_groups(&[]), vec![LINUX_GROUP.to_string()]);

        let records = vec![record("i-2", "222", "eu-west-1", "stopped", Some("windows"))];
        let groups = derive_groups(&records);

        assert!(groups.contains(&LINUX_GROUP.to_string()));
    }

    #[test]
    fn group_set_is_deduplicated() {
        let records = vec![
            record("i-1", "111", "us-east-1", "running", None),
            record("i-2", "111", "us-east-1", "running", None),
            record("i-3", "111", "us-west-2", "running", Some("windows")),
        ];

        let groups = derive_groups(&records);

        assert_eq!(
            groups,
            vec!["linux", "111", "us_east_1", "running", "us_west_2", "windows"]
        );
    }

    #[test]
    fn projects_hosts_groups_and_variables() {
        let records = vec![record("i-1", "111", "us-east-1", "running", None)];
        let mut inventory = InMemoryInventory::new();

        project(&records, &mut inventory).unwrap();

        assert_eq!(inventory.hosts(), ["i-1"]);
        assert_eq!(inventory.variable("i-1", "ansible_host"), Some("i-1"));
        assert_eq!(
            inventory.groups_of("i-1"),
            ["111", "us_east_1", "running", "linux"]
        );
        assert!(inventory.groups().contains(&"linux".to_string()));
    }

    #[test]
    fn windows_host_never_joins_linux() {
        let records = vec![record("i-2", "222", "eu-west-1", "stopped", Some("windows"))];
        let mut inventory = InMemoryInventory::new();

        project(&records, &mut inventory).unwrap();

        let groups = inventory.groups_of("i-2");
        assert!(groups.contains(&"windows".to_string()));
        assert!(!groups.contains(&"linux".to_string()));
    }

    #[test]
    fn duplicate_resource_ids_are_not_reconciled() {
        // Legacy behavior: later records overwrite host variables and add
        // memberships on top of earlier ones.
        let records = vec![
            record("i-1", "111", "us-east-1", "running", None),
            record("i-1", "111", "us-east-1", "stopped", None),
        ];
        let mut inventory = InMemoryInventory::new();

        project(&records, &mut inventory).unwrap();

        assert_eq!(inventory.hosts(), ["i-1"]);
        let groups = inventory.groups_of("i-1");
        assert!(groups.contains(&"running".to_string()));
        assert!(groups.contains(&"stopped".to_string()));
    }

    #[test]
    fn sink_rejection_aborts_projection() {
        // An empty resource id is rejected by the in-memory sink.
        let records = vec![
            record("", "111", "us-east-1", "running", None),
            record("i-2", "111", "us-east-1", "running", None),
        ];
        let mut inventory = InMemoryInventory::new();

        assert!(project(&records, &mut inventory).is_err());
        assert!(inventory.hosts().is_empty());
    }

    #[test]
    fn sink_operations_are_idempotent() {
        let mut inventory = InMemoryInventory::new();

        inventory.add_group("linux").unwrap();
        inventory.add_group("linux").unwrap();
        inventory.add_host("i-1", Some("linux")).unwrap();
        inventory.add_host("i-1", Some("linux")).unwrap();

        assert_eq!(inventory.groups(), ["linux"]);
        assert_eq!(inventory.hosts(), ["i-1"]);
        assert_eq!(inventory.groups_of("i-1"), ["linux"]);
    }
}
