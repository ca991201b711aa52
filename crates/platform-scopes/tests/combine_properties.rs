//! Property tests for scope combination.

use platform_scopes::{combine_scopes, Scope, ScopeGroup, ScopeSet, GLOBAL_GROUP, PROJECT_GROUP, SHARING_GROUP};
use proptest::prelude::*;

fn scope() -> impl Strategy<Value = Scope> {
    "(workflow|credential):(create|read|update|delete|list|execute|share|move)".prop_map(Scope::new)
}

fn scopes() -> impl Strategy<Value = Vec<Scope>> {
    prop::collection::vec(scope(), 0..8)
}

proptest! {
    #[test]
    fn test_bypass_group_is_always_included(global in scopes(), project in scopes(), mask in scopes()) {
        let combined = combine_scopes(
            &[ScopeGroup::new(GLOBAL_GROUP, &global), ScopeGroup::new(PROJECT_GROUP, &project)],
            &[ScopeGroup::new(SHARING_GROUP, &mask)],
            &[GLOBAL_GROUP],
        );

        for scope in &global {
            prop_assert!(combined.has(scope));
        }
    }

    #[test]
    fn test_masked_group_never_exceeds_mask(project in scopes(), mask in scopes()) {
        let combined = combine_scopes(
            &[ScopeGroup::new(PROJECT_GROUP, &project)],
            &[ScopeGroup::new(SHARING_GROUP, &mask)],
            &[GLOBAL_GROUP],
        );
        let mask_set: ScopeSet = mask.iter().collect();
        let project_set: ScopeSet = project.iter().collect();

        prop_assert!(mask_set.contains_all(&combined));
        prop_assert!(project_set.contains_all(&combined));
    }

    #[test]
    fn test_no_mask_is_union(a in scopes(), b in scopes()) {
        let combined = combine_scopes(&[ScopeGroup::new("a", &a), ScopeGroup::new("b", &b)], &[], &[]);
        let union: ScopeSet = a.iter().chain(b.iter()).collect();

        prop_assert_eq!(combined, union);
    }

    #[test]
    fn test_source_order_does_not_matter(mut project in scopes(), mask in scopes()) {
        let forward = combine_scopes(
            &[ScopeGroup::new(PROJECT_GROUP, &project)],
            &[ScopeGroup::new(SHARING_GROUP, &mask)],
            &[],
        )
        .into_sorted_vec();

        project.reverse();
        let backward = combine_scopes(
            &[ScopeGroup::new(PROJECT_GROUP, &project)],
            &[ScopeGroup::new(SHARING_GROUP, &mask)],
            &[],
        )
        .into_sorted_vec();

        prop_assert_eq!(&forward, &backward);
        prop_assert!(forward.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
