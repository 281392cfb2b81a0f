//! Composes the backend query for the file listing.

use docbox_core::types::{DocumentQuery, Filter, FileKind, SortSpec};
use docbox_entity::file::attrs;
use docbox_entity::user::User;

/// Build the files-collection query for one caller.
///
/// The access predicate always comes first and is the sole read-authorization
/// boundary: a caller sees a document only when they own it or their email is
/// in its shared list. Optional type and name-substring filters AND onto it,
/// followed by the parsed sort key and the optional result cap.
pub fn build_file_query(
    current_user: &User,
    types: &[FileKind],
    search_text: &str,
    sort: &str,
    limit: Option<u32>,
) -> DocumentQuery {
    let mut query = DocumentQuery::new().filter(Filter::or(vec![
        Filter::equal(attrs::OWNER, current_user.id.as_str()),
        Filter::contains(attrs::USERS, current_user.email.as_str()),
    ]));

    if !types.is_empty() {
        query = query.filter(Filter::equal_any(
            attrs::TYPE,
            types.iter().map(|kind| kind.as_str().to_string()).collect(),
        ));
    }

    if !search_text.is_empty() {
        query = query.filter(Filter::contains(attrs::NAME, search_text));
    }

    query = query.sort(SortSpec::parse(sort));

    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    query
}
