use std::collections::HashSet;
use std::hash::Hash;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Remove items with a repeated key while keeping first-occurrence order
pub fn dedup_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_by_key_keeps_order() {
        let ids = vec!["t3", "t1", "t3", "t2", "t1"];
        assert_eq!(dedup_by_key(ids, |id| *id), vec!["t3", "t1", "t2"]);
    }

    #[test]
    fn test_now_millis_is_positive() {
        assert!(now_millis() > 0);
    }
}
