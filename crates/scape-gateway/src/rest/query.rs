//! PostgREST query-string construction.

use scape_core::RecordId;

use crate::Collection;

/// Builder for `{rest_root}/{table}?...` URLs.
#[derive(Debug, Clone)]
pub struct TableQuery {
    collection: Collection,
    params: Vec<String>,
}

impl TableQuery {
    /// Start a query selecting every column.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            params: vec!["select=*".to_string()],
        }
    }

    /// Replace the column selection.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.params[0] = format!("select={columns}");
        self
    }

    /// `column = value` filter.
    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params
            .push(format!("{column}=eq.{}", urlencoding::encode(value)));
        self
    }

    #[must_use]
    pub fn id(self, id: RecordId) -> Self {
        self.eq("id", &id.to_string())
    }

    /// Case-insensitive substring match across the collection's search columns.
    #[must_use]
    pub fn search(mut self, term: &str) -> Self {
        let pattern = quote(&format!("*{}*", escape_like(term)));
        let clauses = self
            .collection
            .search_columns()
            .iter()
            .map(|column| format!("{column}.ilike.{pattern}"))
            .collect::<Vec<_>>()
            .join(",");
        self.params
            .push(format!("or={}", urlencoding::encode(&format!("({clauses})"))));
        self
    }

    /// Apply the collection's default ordering.
    #[must_use]
    pub fn ordered(mut self) -> Self {
        let (column, descending) = self.collection.order();
        let direction = if descending { "desc" } else { "asc" };
        self.params.push(format!("order={column}.{direction}"));
        self
    }

    /// Explicit ordering.
    #[must_use]
    pub fn order_by(mut self, column: &str) -> Self {
        self.params.push(format!("order={column}.asc"));
        self
    }

    #[must_use]
    pub fn url(&self, rest_root: &str) -> String {
        format!(
            "{rest_root}/{}?{}",
            self.collection.table(),
            self.params.join("&")
        )
    }
}

/// Make `%`, `_` and `\` match themselves inside a LIKE pattern.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Double-quote a filter value so reserved characters (`,` `.` `(` `)`) stay literal.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROOT: &str = "https://abcd.supabase.co/rest/v1";

    #[test]
    fn list_query_orders_newest_first() {
        let url = TableQuery::new(Collection::Reports).ordered().url(ROOT);
        assert_eq!(url, format!("{ROOT}/smells?select=*&order=created_at.desc"));
    }

    #[test]
    fn library_list_orders_by_name() {
        let url = TableQuery::new(Collection::Library).ordered().url(ROOT);
        assert_eq!(url, format!("{ROOT}/smell_library?select=*&order=name.asc"));
    }

    #[test]
    fn category_filter_is_encoded() {
        let url = TableQuery::new(Collection::Articles)
            .eq("category", "field notes")
            .url(ROOT);
        assert_eq!(url, format!("{ROOT}/articles?select=*&category=eq.field%20notes"));
    }

    #[test]
    fn search_spans_both_columns() {
        let url = TableQuery::new(Collection::Library).search("rose").url(ROOT);
        let decoded = urlencoding::decode(&url).unwrap();
        assert!(decoded.ends_with(r#"or=(name.ilike."*rose*",description.ilike."*rose*")"#));
    }

    #[test]
    fn search_term_quotes_are_escaped() {
        let url = TableQuery::new(Collection::Articles).search("a\"b").url(ROOT);
        let decoded = urlencoding::decode(&url).unwrap();
        assert!(decoded.contains(r#"title.ilike."*a\"b*""#));
    }

    #[test]
    fn search_term_like_wildcards_are_literal() {
        let url = TableQuery::new(Collection::Library).search("50%_off").url(ROOT);
        let decoded = urlencoding::decode(&url).unwrap();
        assert!(decoded.ends_with(
            r#"or=(name.ilike."*50\\%\\_off*",description.ilike."*50\\%\\_off*")"#
        ));
    }

    #[test]
    fn escape_like_prefixes_each_wildcard() {
        assert_eq!(escape_like(r"a\b%c_d"), r"a\\b\%c\_d");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn select_replaces_columns() {
        let url = TableQuery::new(Collection::Reports)
            .select("id,updated_at")
            .order_by("id")
            .url(ROOT);
        assert_eq!(url, format!("{ROOT}/smells?select=id,updated_at&order=id.asc"));
    }
}
