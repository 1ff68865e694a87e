//! Query string serialization for filter forms

use url::form_urlencoded;

use crate::filters::FilterSet;

/// Serialize a filter form into a query string
///
/// Fields appear in form order and are omitted when unconstrained. `page` and
/// `limit` are always appended last. Equal states produce equal strings.
pub fn serialize<F: FilterSet>(state: &F) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for key in F::KEYS {
        let value = state.get(*key);
        if !F::kind(*key).is_unset(value) {
            query.append_pair(F::name(*key), value);
        }
    }
    query.append_pair("page", &state.page().to_string());
    query.append_pair("limit", &state.limit().to_string());
    query.finish()
}
