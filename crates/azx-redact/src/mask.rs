//! Masking detected spans out of text

use azx_core::PiiEntity;

/// Replace every entity span with `[REDACTED-<LABEL>]`, splicing from the
/// back of the text so earlier offsets stay valid. Spans that fall outside
/// the text or off a character boundary are skipped, never panicked on.
pub fn mask(text: &str, entities: &[PiiEntity]) -> String {
    let mut ordered: Vec<&PiiEntity> = entities.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut redacted = text.to_string();
    for entity in ordered {
        if entity.start >= entity.end || entity.end > redacted.len() {
            continue;
        }
        if !redacted.is_char_boundary(entity.start) || !redacted.is_char_boundary(entity.end) {
            continue;
        }
        let marker = format!("[REDACTED-{}]", entity.kind.label());
        redacted.replace_range(entity.start..entity.end, &marker);
    }
    redacted
}
