use indeval_core::{Ind, IndSet};

/// Graph-database surrogate keys that never form a meaningful dependency.
pub const IGNORED_ATTRIBUTES: [&str; 3] = ["startNodeElementId", "endNodeElementId", "elementID"];

/// Keep the dependencies that take part in scoring: exactly one attribute on
/// each side, neither of them a denylisted surrogate key.
pub fn filter_scorable(set: &IndSet) -> IndSet {
    let scorable: IndSet = set.iter().filter(|ind| is_scorable(ind)).cloned().collect();
    tracing::info!(
        event = "inds_filtered",
        discovered = set.len(),
        scorable = scorable.len()
    );
    scorable
}

fn is_scorable(ind: &Ind) -> bool {
    let (Some(left), Some(right)) = (ind.left().single_attribute(), ind.right().single_attribute())
    else {
        return false;
    };
    !IGNORED_ATTRIBUTES.contains(&left) && !IGNORED_ATTRIBUTES.contains(&right)
}

#[cfg(test)]
mod tests {
    use indeval_core::{EntityRef, IndKind};

    use super::*;

    fn ind(left: &[&str], right: &[&str]) -> Ind {
        let attrs = |names: &[&str]| names.iter().map(|name| name.to_string()).collect();
        Ind::new(
            EntityRef::new("Neo4j", "PLACED", attrs(left)).unwrap(),
            EntityRef::new("Neo4j", "Customer", attrs(right)).unwrap(),
            IndKind::ImplicitReference,
        )
        .unwrap()
    }

    #[test]
    fn drops_multi_attribute_dependencies() {
        let set: IndSet = vec![ind(&["a", "b"], &["c", "d"]), ind(&["a"], &["c"])]
            .into_iter()
            .collect();
        let scorable = filter_scorable(&set);
        assert_eq!(scorable.len(), 1);
        assert!(scorable.contains("Neo4j.PLACED.[a]->Neo4j.Customer.[c]"));
    }

    #[test]
    fn drops_surrogate_keys_on_either_side() {
        let set: IndSet = vec![
            ind(&["startNodeElementId"], &["id"]),
            ind(&["customer"], &["elementID"]),
            ind(&["endNodeElementId"], &["elementID"]),
            ind(&["customer"], &["id"]),
        ]
        .into_iter()
        .collect();
        let scorable = filter_scorable(&set);
        let ids: Vec<&str> = scorable.ids().collect();
        assert_eq!(ids, vec!["Neo4j.PLACED.[customer]->Neo4j.Customer.[id]"]);
    }

    #[test]
    fn denylist_is_case_sensitive() {
        let set: IndSet = vec![ind(&["elementId"], &["id"])].into_iter().collect();
        assert_eq!(filter_scorable(&set).len(), 1);
    }
}
