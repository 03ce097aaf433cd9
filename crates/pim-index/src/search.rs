use serde_json::{json, Map, Value};

/// Accumulates boolean clauses and sorts, then renders the engine query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQueryBuilder {
    filter: Vec<Value>,
    must_not: Vec<Value>,
    should: Vec<Value>,
    sort: Vec<Value>,
}

impl SearchQueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, clause: Value) -> &mut Self {
        self.filter.push(clause);
        self
    }

    pub fn add_must_not(&mut self, clause: Value) -> &mut Self {
        self.must_not.push(clause);
        self
    }

    pub fn add_should(&mut self, clause: Value) -> &mut Self {
        self.should.push(clause);
        self
    }

    pub fn add_sort(&mut self, sort: Value) -> &mut Self {
        self.sort.push(sort);
        self
    }

    #[must_use]
    pub fn filter_clauses(&self) -> &[Value] {
        &self.filter
    }

    #[must_use]
    pub fn must_not_clauses(&self) -> &[Value] {
        &self.must_not
    }

    #[must_use]
    pub fn should_clauses(&self) -> &[Value] {
        &self.should
    }

    #[must_use]
    pub fn sorts(&self) -> &[Value] {
        &self.sort
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.must_not.is_empty()
            && self.should.is_empty()
            && self.sort.is_empty()
    }

    /// The query body. Empty clause lists are left out, as is `sort`.
    #[must_use]
    pub fn query(&self) -> Value {
        let mut bool_query = Map::new();
        if !self.filter.is_empty() {
            bool_query.insert("filter".to_string(), Value::from(self.filter.clone()));
        }
        if !self.must_not.is_empty() {
            bool_query.insert("must_not".to_string(), Value::from(self.must_not.clone()));
        }
        if !self.should.is_empty() {
            bool_query.insert("should".to_string(), Value::from(self.should.clone()));
            bool_query.insert("minimum_should_match".to_string(), json!(1));
        }

        let mut query = json!({
            "_source": ["identifier"],
            "query": {"constant_score": {"filter": {"bool": bool_query}}},
        });
        if !self.sort.is_empty() {
            query["sort"] = Value::from(self.sort.clone());
        }
        query
    }
}
