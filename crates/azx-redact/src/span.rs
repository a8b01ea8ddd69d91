//! Span repair and duplicate suppression

use azx_core::PiiEntity;

/// Two findings whose starts and ends are both within this window count as
/// the same finding.
const DUPLICATE_WINDOW: usize = 5;

/// Union of two detector outputs with near-duplicate suppression. Earlier
/// entities win, so callers put the higher-trust detector first.
pub fn merge_entities(primary: Vec<PiiEntity>, secondary: Vec<PiiEntity>) -> Vec<PiiEntity> {
    let mut unique: Vec<PiiEntity> = Vec::new();
    for entity in primary.into_iter().chain(secondary) {
        let duplicate = unique.iter().any(|kept| {
            kept.start.abs_diff(entity.start) < DUPLICATE_WINDOW
                && kept.end.abs_diff(entity.end) < DUPLICATE_WINDOW
        });
        if !duplicate {
            unique.push(entity);
        }
    }
    unique
}

/// Repair a reported span against the text it claims to come from.
///
/// Model-reported offsets are untrusted. When `text[start..end]` is not the
/// claimed snippet, the span moves to the first occurrence of the snippet at
/// or after the claimed start, then to the first occurrence anywhere.
/// Returns `false` when the snippet does not occur in the text at all.
pub fn normalize_span(text: &str, entity: &mut PiiEntity) -> bool {
    if entity.text.is_empty() {
        return false;
    }

    if entity.start < entity.end
        && entity.end <= text.len()
        && text.is_char_boundary(entity.start)
        && text.is_char_boundary(entity.end)
        && &text[entity.start..entity.end] == entity.text.as_str()
    {
        return true;
    }

    let mut first = None;
    for (index, matched) in text.match_indices(entity.text.as_str()) {
        if first.is_none() {
            first = Some(index);
        }
        if index >= entity.start {
            entity.start = index;
            entity.end = index + matched.len();
            return true;
        }
    }
    if let Some(index) = first {
        entity.start = index;
        entity.end = index + entity.text.len();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use azx_core::PiiKind;

    #[test]
    fn test_merge_keeps_distinct_entities() {
        let primary = vec![PiiEntity::new("a@b.io", PiiKind::Email, 0.95, 10, 16)];
        let secondary = vec![PiiEntity::new("1.2.3.4", PiiKind::IpAddress, 0.8, 40, 47)];
        let merged = merge_entities(primary, secondary);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_drops_near_duplicates_first_wins() {
        let primary = vec![PiiEntity::new("a@b.io", PiiKind::Email, 0.95, 10, 16)];
        let secondary = vec![PiiEntity::new("a@b.io", PiiKind::Email, 0.8, 12, 18)];
        let merged = merge_entities(primary, secondary);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, 0.95);
    }

    #[test]
    fn test_merge_window_is_exclusive() {
        // Exactly five bytes apart is no longer a duplicate
        let primary = vec![PiiEntity::new("1234", PiiKind::Phone, 0.9, 10, 14)];
        let secondary = vec![PiiEntity::new("1234", PiiKind::Phone, 0.8, 15, 19)];
        assert_eq!(merge_entities(primary, secondary).len(), 2);
    }

    #[test]
    fn test_merge_suppresses_within_one_batch() {
        let primary = vec![
            PiiEntity::new("a@b.io", PiiKind::Email, 0.95, 10, 16),
            PiiEntity::new("a@b.io", PiiKind::Email, 0.91, 11, 17),
        ];
        assert_eq!(merge_entities(primary, Vec::new()).len(), 1);
    }

    #[test]
    fn test_normalize_accepts_exact_span() {
        let text = "call 555-123-4567 today";
        let mut entity = PiiEntity::new("555-123-4567", PiiKind::Phone, 0.9, 5, 17);
        assert!(normalize_span(text, &mut entity));
        assert_eq!((entity.start, entity.end), (5, 17));
    }

    #[test]
    fn test_normalize_relocates_forward() {
        let text = "xx a@b.io yy a@b.io zz";
        let mut entity = PiiEntity::new("a@b.io", PiiKind::Email, 0.9, 10, 16);
        assert!(normalize_span(text, &mut entity));
        // First occurrence at or after the claimed start
        assert_eq!((entity.start, entity.end), (13, 19));
    }

    #[test]
    fn test_normalize_falls_back_to_first_occurrence() {
        let text = "a@b.io is the only one";
        let mut entity = PiiEntity::new("a@b.io", PiiKind::Email, 0.9, 500, 506);
        assert!(normalize_span(text, &mut entity));
        assert_eq!((entity.start, entity.end), (0, 6));
    }

    #[test]
    fn test_normalize_drops_missing_snippet() {
        let mut entity = PiiEntity::new("ghost", PiiKind::Name, 0.9, 0, 5);
        assert!(!normalize_span("no such snippet here", &mut entity));
    }

    #[test]
    fn test_normalize_handles_multibyte_claimed_span() {
        // Claimed start lands inside a multibyte character; must not panic
        let text = "café john@x.io";
        let mut entity = PiiEntity::new("john@x.io", PiiKind::Email, 0.9, 4, 13);
        assert!(normalize_span(text, &mut entity));
        assert_eq!(&text[entity.start..entity.end], "john@x.io");
    }

    #[test]
    fn test_normalize_rejects_empty_text() {
        let mut entity = PiiEntity::new("", PiiKind::Name, 0.9, 0, 0);
        assert!(!normalize_span("anything", &mut entity));
    }
}
