use std::sync::OnceLock;

use regex::Regex;

/// A fluent builder for PostgREST read queries.
///
/// Filters and sort directives accumulate in call order; `select` and
/// `limit` are last-write-wins. [`build`](Self::build) freezes the builder
/// into an immutable [`QueryRequest`] that a client executes.
///
/// # Example
///
/// ```
/// use cabinet_rest::{OrderOptions, QueryBuilder};
///
/// let request = QueryBuilder::new("parcours")
///     .select("id, titre, ministre ( nom )")
///     .where_eq("ministre_id", 42)
///     .order_by("ordre", OrderOptions::asc())
///     .limit(50)
///     .build();
///
/// assert_eq!(
///     request.query_string(),
///     "?select=id%2Ctitre%2Cministre%28nom%29&ministre_id=eq.42&order=ordre.asc&limit=50"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
    select: String,
    filters: Vec<Filter>,
    order: Vec<OrderDirective>,
    limit: Option<u64>,
}

/// A server-side predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column=eq.value`
    Eq { column: String, value: String },
    /// `column=in.(a,b)`
    In { column: String, values: Vec<String> },
    /// `column=ilike.pattern`
    ILike { column: String, pattern: String },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } | Filter::ILike { column, .. } => {
                column
            }
        }
    }

    fn param(&self) -> (String, String) {
        match self {
            Filter::Eq { column, value } => (encode(column), format!("eq.{}", encode(value))),
            Filter::In { column, values } => {
                let members: Vec<String> = values.iter().map(|v| encode(v)).collect();
                (encode(column), format!("in.({})", members.join(",")))
            }
            Filter::ILike { column, pattern } => {
                (encode(column), format!("ilike.{}", encode(pattern)))
            }
        }
    }
}

/// Options for [`QueryBuilder::order_by`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOptions {
    pub ascending: bool,
    /// Sort inside an embedded resource instead of the primary table.
    pub related_table: Option<String>,
    /// `Some(true)` for `nullsfirst`, `Some(false)` for `nullslast`.
    pub nulls_first: Option<bool>,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self::asc()
    }
}

impl OrderOptions {
    pub fn asc() -> Self {
        Self {
            ascending: true,
            related_table: None,
            nulls_first: None,
        }
    }

    pub fn desc() -> Self {
        Self {
            ascending: false,
            ..Self::asc()
        }
    }

    pub fn related(mut self, table: impl Into<String>) -> Self {
        self.related_table = Some(table.into());
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls_first = Some(true);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls_first = Some(false);
        self
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDirective {
    pub column: String,
    pub ascending: bool,
    pub related_table: Option<String>,
    pub nulls_first: Option<bool>,
}

impl OrderDirective {
    fn term(&self) -> String {
        let mut term = format!(
            "{}.{}",
            encode(&self.column),
            if self.ascending { "asc" } else { "desc" }
        );
        match self.nulls_first {
            Some(true) => term.push_str(".nullsfirst"),
            Some(false) => term.push_str(".nullslast"),
            None => {}
        }
        term
    }
}

/// Values accepted by [`QueryBuilder::where_in`]. Scalars become a
/// one-element set.
pub trait IntoInList {
    fn into_in_list(self) -> Vec<String>;
}

impl IntoInList for &str {
    fn into_in_list(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoInList for String {
    fn into_in_list(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoInList for &String {
    fn into_in_list(self) -> Vec<String> {
        vec![self.clone()]
    }
}

macro_rules! impl_in_list_scalar {
    ($($ty:ty),+) => {
        $(
            impl IntoInList for $ty {
                fn into_in_list(self) -> Vec<String> {
                    vec![self.to_string()]
                }
            }
        )+
    };
}

impl_in_list_scalar!(i32, i64, u32, u64, usize, bool);

impl<T: ToString> IntoInList for Vec<T> {
    fn into_in_list(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: ToString> IntoInList for &[T] {
    fn into_in_list(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: ToString, const N: usize> IntoInList for [T; N] {
    fn into_in_list(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl QueryBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Set the column selection. Embedded selectors such as
    /// `ministre(nom,prenom)` are kept; whitespace around `(`, `)` and `,`
    /// is dropped.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = normalize_select(columns);
        self
    }

    pub fn where_eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn where_in(mut self, column: &str, values: impl IntoInList) -> Self {
        self.filters.push(Filter::In {
            column: column.to_string(),
            values: values.into_in_list(),
        });
        self
    }

    /// Case-insensitive pattern match (`*` or `%` as wildcard).
    pub fn where_ilike(mut self, column: &str, pattern: &str) -> Self {
        self.filters.push(Filter::ILike {
            column: column.to_string(),
            pattern: pattern.to_string(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, options: OrderOptions) -> Self {
        self.order.push(OrderDirective {
            column: column.to_string(),
            ascending: options.ascending,
            related_table: options.related_table,
            nulls_first: options.nulls_first,
        });
        self
    }

    /// Cap the number of rows. Negative values are ignored.
    pub fn limit(mut self, limit: i64) -> Self {
        match u64::try_from(limit) {
            Ok(limit) => self.limit = Some(limit),
            Err(_) => tracing::trace!(limit, table = %self.table, "ignoring negative limit"),
        }
        self
    }

    /// Freeze the accumulated state.
    pub fn build(self) -> QueryRequest {
        QueryRequest {
            table: self.table,
            select: self.select,
            filters: self.filters,
            order: self.order,
            limit: self.limit,
        }
    }
}

/// Immutable description of a read query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    table: String,
    select: String,
    filters: Vec<Filter>,
    order: Vec<OrderDirective>,
    limit: Option<u64>,
}

impl QueryRequest {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn select(&self) -> &str {
        &self.select
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn order(&self) -> &[OrderDirective] {
        &self.order
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Path below the base URL: `/rest/v1/{table}`.
    pub fn path(&self) -> String {
        format!("/rest/v1/{}", encode(&self.table))
    }

    /// Serialize to a query string: `select` first, filters in call order,
    /// order parameters, then `limit`.
    ///
    /// Sort directives sharing a qualifier (none, or the same related table)
    /// are comma-joined into one parameter, in call order; parameters appear
    /// in order of first use.
    pub fn query_string(&self) -> String {
        let mut params: Vec<(String, String)> = Vec::with_capacity(self.filters.len() + 3);
        params.push(("select".to_string(), encode(&self.select)));
        params.extend(self.filters.iter().map(Filter::param));

        let mut order_groups: Vec<(Option<&str>, Vec<String>)> = Vec::new();
        for directive in &self.order {
            let qualifier = directive.related_table.as_deref();
            match order_groups.iter_mut().find(|(q, _)| *q == qualifier) {
                Some((_, terms)) => terms.push(directive.term()),
                None => order_groups.push((qualifier, vec![directive.term()])),
            }
        }
        for (qualifier, terms) in order_groups {
            let key = match qualifier {
                Some(table) => format!("{}.order", encode(table)),
                None => "order".to_string(),
            };
            params.push((key, terms.join(",")));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let joined: Vec<String> = params.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("?{}", joined.join("&"))
    }
}

static SELECT_SEPARATORS: OnceLock<Regex> = OnceLock::new();

fn select_separators() -> &'static Regex {
    SELECT_SEPARATORS.get_or_init(|| Regex::new(r"\s*([(),])\s*").expect("valid select pattern"))
}

/// Drop whitespace around `(`, `)` and `,`. Empty selections mean `*`.
pub fn normalize_select(columns: &str) -> String {
    let normalized = select_separators().replace_all(columns.trim(), "$1");
    if normalized.is_empty() {
        "*".to_string()
    } else {
        normalized.into_owned()
    }
}

pub(crate) fn encode(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_select() {
        let request = QueryBuilder::new("ministres").build();
        assert_eq!(request.select(), "*");
        assert_eq!(request.query_string(), "?select=%2A");
        assert_eq!(request.path(), "/rest/v1/ministres");
    }

    #[test]
    fn test_select_normalization() {
        assert_eq!(normalize_select(" a ( b , c ) "), "a(b,c)");
        assert_eq!(normalize_select("id,\n  nom"), "id,nom");
        assert_eq!(normalize_select("   "), "*");
        assert_eq!(
            normalize_select("*, parti:partis ( nom , couleur )"),
            "*,parti:partis(nom,couleur)"
        );
    }

    #[test]
    fn test_select_is_last_write_wins() {
        let request = QueryBuilder::new("t").select("a").select("b").build();
        assert_eq!(request.select(), "b");
    }

    #[test]
    fn test_parameter_precedence() {
        let request = QueryBuilder::new("parcours")
            .limit(5)
            .order_by("ordre", OrderOptions::asc())
            .where_eq("ministre_id", "7")
            .select("id")
            .where_ilike("titre", "*ministre*")
            .build();
        assert_eq!(
            request.query_string(),
            "?select=id&ministre_id=eq.7&titre=ilike.%2Aministre%2A&order=ordre.asc&limit=5"
        );
    }

    #[test]
    fn test_equality_filters_are_independent_params() {
        let request = QueryBuilder::new("t")
            .where_eq("a", 1)
            .where_eq("a", 2)
            .build();
        assert_eq!(request.query_string(), "?select=%2A&a=eq.1&a=eq.2");
        assert_eq!(request.filters().len(), 2);
    }

    #[test]
    fn test_in_list_members_are_encoded_individually() {
        let request = QueryBuilder::new("t")
            .where_in("nom", vec!["a,b", "é"])
            .build();
        assert_eq!(request.query_string(), "?select=%2A&nom=in.(a%2Cb,%C3%A9)");
    }

    #[test]
    fn test_scalar_in_matches_single_element_list() {
        let scalar = QueryBuilder::new("t").where_in("id", "a").build();
        let list = QueryBuilder::new("t").where_in("id", ["a"]).build();
        let slice = QueryBuilder::new("t").where_in("id", &["a"][..]).build();
        assert_eq!(scalar.query_string(), list.query_string());
        assert_eq!(scalar.query_string(), slice.query_string());
        assert_eq!(scalar.query_string(), "?select=%2A&id=in.(a)");
    }

    #[test]
    fn test_multiple_order_keys_keep_call_order() {
        let request = QueryBuilder::new("parcours")
            .order_by("categorie", OrderOptions::asc())
            .order_by("date_debut", OrderOptions::desc().nulls_last())
            .order_by("ordre", OrderOptions::asc().related("postes"))
            .order_by("titre", OrderOptions::asc())
            .build();
        assert_eq!(
            request.query_string(),
            "?select=%2A&order=categorie.asc,date_debut.desc.nullslast,titre.asc&postes.order=ordre.asc"
        );
    }

    #[test]
    fn test_negative_limit_is_ignored() {
        let request = QueryBuilder::new("t").limit(10).limit(-1).build();
        assert_eq!(request.limit(), Some(10));

        let request = QueryBuilder::new("t").limit(-3).build();
        assert_eq!(request.limit(), None);

        let request = QueryBuilder::new("t").limit(0).build();
        assert_eq!(request.query_string(), "?select=%2A&limit=0");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let build = || {
            QueryBuilder::new("ministres")
                .select("id, nom")
                .where_in("parti", ["A", "B"])
                .where_eq("actif", true)
                .order_by("rang", OrderOptions::asc())
                .limit(20)
                .build()
        };
        assert_eq!(build(), build());
        assert_eq!(build().query_string(), build().query_string());
    }

    #[test]
    fn test_column_names_are_encoded() {
        let request = QueryBuilder::new("t").where_eq("nom complet", "Élise B").build();
        assert_eq!(
            request.query_string(),
            "?select=%2A&nom%20complet=eq.%C3%89lise%20B"
        );
    }
}
