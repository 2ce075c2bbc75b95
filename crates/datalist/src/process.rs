//! Per-member transformation of a data list.

use tracing::debug;

use crate::metadata::{format_metadata, DataList, Metadata};

/// Applies `f` to each member, keeping its metadata.
///
/// A member for which `f` returns `Ok(None)` is dropped silently; this is
/// how downstream computations skip simulations that do not apply (for
/// example a model that never reaches a warming level). An `Err` from `f`
/// aborts the whole pass.
pub fn process_datalist<T, U, E>(
    list: DataList<T>,
    mut f: impl FnMut(&T, &Metadata) -> Result<Option<U>, E>,
) -> Result<DataList<U>, E> {
    let mut out = Vec::with_capacity(list.len());
    for (data, meta) in list {
        match f(&data, &meta)? {
            Some(result) => out.push((result, meta)),
            None => {
                debug!(metadata = %format_metadata(&meta), "transform returned nothing, skipping");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::metadata;

    #[test]
    fn maps_and_keeps_metadata() {
        let list = vec![
            (2, metadata([("model", "a")])),
            (3, metadata([("model", "b")])),
        ];
        let out: DataList<i32> =
            process_datalist(list, |x, _| Ok::<_, ()>(Some(x * 10))).unwrap();
        assert_eq!(out[0].0, 20);
        assert_eq!(out[1].1.get("model").map(String::as_str), Some("b"));
    }

    #[test]
    fn none_results_are_skipped() {
        let list = vec![
            (1, metadata([("model", "a")])),
            (2, metadata([("model", "b")])),
            (3, metadata([("model", "c")])),
        ];
        let out =
            process_datalist(list, |x, _| Ok::<_, ()>((x % 2 == 1).then_some(*x))).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.iter().map(|(d, _)| *d).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn errors_abort() {
        let list = vec![(1, metadata([("model", "a")]))];
        let result: Result<DataList<i32>, &str> = process_datalist(list, |_, _| Err("boom"));
        assert_eq!(result.unwrap_err(), "boom");
    }
}
