use serde_json::Value;

/// Safe positional access over the untyped payload. The upstream schema is
/// convention-only, so every lookup returns `None` on a shape mismatch
/// instead of failing; callers treat `None` as "absent".

/// Elements of `v` if it is an array.
pub fn seq(v: &Value) -> Option<&[Value]> {
    v.as_array().map(|a| a.as_slice())
}

/// `v[idx]` if `v` is an array long enough.
pub fn item(v: &Value, idx: usize) -> Option<&Value> {
    v.as_array().and_then(|a| a.get(idx))
}

/// String at `v[idx]`.
pub fn text(v: &Value, idx: usize) -> Option<&str> {
    item(v, idx).and_then(|x| x.as_str())
}

/// Integer code at `v[idx]`.
pub fn code(v: &Value, idx: usize) -> Option<i64> {
    item(v, idx).and_then(|x| x.as_i64())
}

/// Walk a chain of indices down from `root`.
pub fn path<'a>(root: &'a Value, idxs: &[usize]) -> Option<&'a Value> {
    idxs.iter().try_fold(root, |v, &i| item(v, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_out_of_range() {
        let v = json!([1, 2]);
        assert!(item(&v, 5).is_none());
    }

    #[test]
    fn item_on_non_array() {
        assert!(item(&json!("text"), 0).is_none());
        assert!(item(&json!(null), 0).is_none());
    }

    #[test]
    fn text_rejects_non_strings() {
        let v = json!([42, "ok"]);
        assert!(text(&v, 0).is_none());
        assert_eq!(text(&v, 1), Some("ok"));
    }

    #[test]
    fn path_walks_nesting() {
        let v = json!([null, [null, ["deep"]]]);
        assert_eq!(path(&v, &[1, 1, 0]).and_then(|x| x.as_str()), Some("deep"));
        assert!(path(&v, &[1, 2, 0]).is_none());
    }
}
