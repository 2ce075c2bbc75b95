//! Pairwise alignment of two data lists by shared metadata keys.

use tracing::debug;

use crate::error::DataListError;
use crate::metadata::{format_metadata, DataList};
use crate::select::{select_by_metadata, Predicate};

/// Keys that identify a simulation across variables: same model, same
/// experiment, same ensemble member.
pub const DEFAULT_SELECT_BY: [&str; 3] = ["model", "exp", "ens"];

/// Pairs each member of `list_a` with its partner in `list_b`.
///
/// For every member of `list_a`, the values of `select_by` (or
/// [`DEFAULT_SELECT_BY`] if `None`) are looked up in its metadata and used
/// to select from `list_b`. A member with no partner is dropped. The two
/// returned lists are positionally aligned and each keeps its own side's
/// full metadata; the partner's non-alignment keys (variable name,
/// postprocessing step) stay available. With `check` set, more than one
/// partner is an error; otherwise the first partner wins.
///
/// # Errors
///
/// Returns [`DataListError::MissingMetadataKey`] if a `list_a` member
/// lacks one of the alignment keys and [`DataListError::AmbiguousMatch`]
/// on a checked multi-partner match.
pub fn match_data_list<A: Clone, B: Clone>(
    list_a: &DataList<A>,
    list_b: &DataList<B>,
    select_by: Option<&[&str]>,
    check: bool,
) -> Result<(DataList<A>, DataList<B>), DataListError> {
    let select_by = select_by.unwrap_or(&DEFAULT_SELECT_BY);

    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    for (data_a, meta) in list_a {
        let mut predicate = Predicate::new();
        for key in select_by {
            let value = meta
                .get(*key)
                .ok_or_else(|| DataListError::MissingMetadataKey {
                    key: key.to_string(),
                    metadata: format_metadata(meta),
                })?;
            predicate = predicate.equals(key, value);
        }

        let mut matches = select_by_metadata(list_b, &predicate);
        if matches.is_empty() {
            debug!(metadata = %format_metadata(meta), "no partner found, dropping");
            continue;
        }
        if check && matches.len() > 1 {
            return Err(DataListError::AmbiguousMatch {
                metadata: format_metadata(meta),
                count: matches.len(),
            });
        }
        out_a.push((data_a.clone(), meta.clone()));
        out_b.push(matches.swap_remove(0));
    }
    Ok((out_a, out_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{metadata, Metadata};

    fn member(model: &str, exp: &str, ens: &str) -> Metadata {
        metadata([("model", model), ("exp", exp), ("ens", ens)])
    }

    fn member_with_varn(model: &str, varn: &str) -> Metadata {
        metadata([
            ("model", model),
            ("exp", "ssp585"),
            ("ens", "r1i1p1f1"),
            ("varn", varn),
        ])
    }

    #[test]
    fn pairs_matching_members() {
        let tas = vec![
            (1.0, member("MIROC6", "ssp585", "r1i1p1f1")),
            (2.0, member("CanESM5", "ssp585", "r1i1p1f1")),
        ];
        let pr = vec![
            (10.0, member("CanESM5", "ssp585", "r1i1p1f1")),
            (20.0, member("MIROC6", "ssp585", "r1i1p1f1")),
        ];

        let (out_a, out_b) = match_data_list(&tas, &pr, None, true).unwrap();
        assert_eq!(out_a.len(), out_b.len());
        assert_eq!(out_a.len(), 2);
        // Positionally aligned, ordered by the first list.
        assert_eq!(out_a[0].0, 1.0);
        assert_eq!(out_b[0].0, 20.0);
        assert_eq!(out_a[1].0, 2.0);
        assert_eq!(out_b[1].0, 10.0);
        assert_eq!(out_a[0].1, tas[0].1);
    }

    #[test]
    fn both_sides_keep_their_own_metadata() {
        let tas = vec![(1.0, member_with_varn("MIROC6", "tas"))];
        let pr = vec![(10.0, member_with_varn("MIROC6", "pr"))];

        let (out_a, out_b) = match_data_list(&tas, &pr, None, true).unwrap();
        assert_eq!(out_a[0].1.get("varn").map(String::as_str), Some("tas"));
        assert_eq!(out_b[0].1.get("varn").map(String::as_str), Some("pr"));
    }

    #[test]
    fn unmatched_members_are_dropped() {
        let tas = vec![
            (1.0, member("MIROC6", "ssp585", "r1i1p1f1")),
            (2.0, member("GISS-E2", "ssp585", "r1i1p1f1")),
        ];
        let pr = vec![(10.0, member("MIROC6", "ssp585", "r1i1p1f1"))];

        let (out_a, out_b) = match_data_list(&tas, &pr, None, true).unwrap();
        assert_eq!(out_a.len(), 1);
        assert_eq!(out_b.len(), 1);
        assert_eq!(out_b[0].0, 10.0);
    }

    #[test]
    fn multiple_partners_fail_when_checked() {
        let tas = vec![(1.0, member("MIROC6", "ssp585", "r1i1p1f1"))];
        let pr = vec![
            (10.0, member("MIROC6", "ssp585", "r1i1p1f1")),
            (20.0, member("MIROC6", "ssp585", "r1i1p1f1")),
        ];

        let err = match_data_list(&tas, &pr, None, true).unwrap_err();
        assert!(matches!(err, DataListError::AmbiguousMatch { count: 2, .. }));

        let (_, out_b) = match_data_list(&tas, &pr, None, false).unwrap();
        assert_eq!(out_b[0].0, 10.0);
    }

    #[test]
    fn missing_alignment_key_fails() {
        let tas = vec![(1.0, metadata([("model", "MIROC6")]))];
        let pr: DataList<f64> = Vec::new();

        let err = match_data_list(&tas, &pr, None, true).unwrap_err();
        assert!(matches!(err, DataListError::MissingMetadataKey { .. }));
    }

    #[test]
    fn custom_select_by() {
        let a = vec![(1, metadata([("model", "MIROC6"), ("ens", "r1i1p1f1")]))];
        let b = vec![(2, metadata([("model", "MIROC6"), ("ens", "r2i1p1f1")]))];

        let (out_a, out_b) = match_data_list(&a, &b, Some(&["model"]), true).unwrap();
        assert_eq!(out_a[0].0, 1);
        assert_eq!(out_b[0].0, 2);
    }
}
