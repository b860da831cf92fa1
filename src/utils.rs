//! Text helpers shared by the standardizers and the news document extractor.

use crate::constants::tokenizer::TOKEN_DELIMITERS;

/// Split `text` on the standardization delimiter set.
///
/// Mirrors a plain character split: adjacent delimiters produce empty tokens,
/// and callers are expected to ignore them.
pub fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(TOKEN_DELIMITERS)
}

/// Rewrite `text` by scanning its tokens and replacing every substring
/// occurrence of each matched token.
///
/// Tokens are taken from the original text and processed in scan order; each
/// replacement runs against the already-rewritten text. Matching is by
/// substring, so a matched token embedded in a longer word is rewritten too.
pub fn replace_matched_tokens<'r, F>(text: &str, mut replacement_for: F) -> String
where
    F: FnMut(&str) -> Option<&'r str>,
{
    let mut rewritten = text.to_string();
    for token in split_tokens(text).filter(|token| !token.is_empty()) {
        if let Some(replacement) = replacement_for(token)
            && rewritten.contains(token)
        {
            rewritten = rewritten.replace(token, replacement);
        }
    }
    rewritten
}

/// Replace line breaks with single spaces, then shrink triple-space runs.
///
/// `\r\n`, `\n` and `\r` are each replaced by one space. Afterwards every
/// non-overlapping `"   "` becomes `" "` in a single pass, so longer runs are
/// shortened but not fully collapsed.
pub fn flatten_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace('\n', " ")
        .replace('\r', " ")
        .replace("   ", " ")
}
