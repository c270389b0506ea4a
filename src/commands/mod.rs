pub mod decrypt;
pub mod encrypt;
pub mod extract;
pub mod info;
pub mod merge;
pub mod meta_set;
pub mod meta_show;
pub mod rotate;
pub mod split;

/// Pages past the end of the document are skipped, not fatal; stale range
/// expressions against a shorter document still do useful work.
pub(crate) fn warn_skipped(skipped: &[u32], total: u32) {
    for page in skipped {
        eprintln!(
            "warning: page {} is beyond the end of the document ({} pages), skipping",
            page, total
        );
    }
}
