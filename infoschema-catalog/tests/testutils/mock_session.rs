//! Scripted session collaborator
//!
//! Interprets just enough of the abstract query shapes the catalog emits:
//! projections of plain columns or one builtin function, a FROM naming an
//! information-schema view (any catalog or database prefix is ignored) and
//! filters made of `=`, `LIKE` and `OR`.

use infoschema_catalog::{
    CatalogError, CatalogResult, CatalogSession, CatalogSource, Dialect, DialectSpaces, Engine,
    Expr, InMemoryTempViews, Row, Select, Statement, TempViewRegistry, Value,
};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;

type Record = HashMap<&'static str, String>;

#[derive(Debug, Clone)]
struct StoredColumn {
    catalog: String,
    schema: String,
    table: String,
    name: String,
    data_type: String,
    is_nullable: String,
}

/// Everything the catalog handed to the session, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Query(Select),
    Statement(Statement),
}

pub struct MockSession {
    dialects: DialectSpaces,
    catalog_function: String,
    database_function: String,
    schemata: Vec<(String, String)>,
    tables: Vec<(String, String, String, String)>,
    columns: Vec<StoredColumn>,
    positional_rows: bool,
    temp_views: InMemoryTempViews,
    current: Mutex<(String, String)>,
    sent: Mutex<Vec<Sent>>,
    failure: Mutex<Option<String>>,
}

impl MockSession {
    /// Empty engine using `engine`'s builtins and default dialects
    pub fn new(engine: Engine) -> Self {
        Self::with_dialects(engine, engine.default_dialects())
    }

    pub fn with_dialects(engine: Engine, dialects: DialectSpaces) -> Self {
        let profile = engine.profile();
        Self {
            dialects,
            catalog_function: match profile.current_catalog {
                CatalogSource::Function(function) => function.name,
                CatalogSource::Fixed { .. } => String::new(),
            },
            database_function: profile.current_database.name,
            schemata: Vec::new(),
            tables: Vec::new(),
            columns: Vec::new(),
            positional_rows: false,
            temp_views: InMemoryTempViews::new(),
            current: Mutex::new((String::new(), String::new())),
            sent: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// DuckDB-flavoured fixture: catalog `memory` with schemas `main`,
    /// `default` and `sales`, a `temp` catalog, current context `memory.main`
    pub fn duckdb() -> Self {
        Self::new(Engine::DuckDb)
            .with_current("memory", "main")
            .with_schema("memory", "main")
            .with_schema("memory", "default")
            .with_schema("memory", "sales")
            .with_schema("temp", "main")
            .with_table("memory", "main", "orders", "BASE TABLE")
            .with_table("memory", "main", "order_summary", "VIEW")
            .with_table("memory", "sales", "invoices", "BASE TABLE")
            .with_column("memory", "main", "orders", "id", "INTEGER", "NO")
            .with_column("memory", "main", "orders", "customer", "VARCHAR", "YES")
            .with_column("memory", "main", "orders", "amount", "DECIMAL(18,3)", "YES")
            .with_column("memory", "sales", "invoices", "id", "BIGINT", "NO")
            .with_column("temp", "main", "scratch", "note", "VARCHAR", "YES")
    }

    pub fn with_current(self, catalog: &str, database: &str) -> Self {
        *self.current.lock() = (catalog.to_string(), database.to_string());
        self
    }

    pub fn with_schema(mut self, catalog: &str, schema: &str) -> Self {
        self.schemata.push((catalog.to_string(), schema.to_string()));
        self
    }

    pub fn with_table(mut self, catalog: &str, schema: &str, name: &str, table_type: &str) -> Self {
        self.tables.push((
            catalog.to_string(),
            schema.to_string(),
            name.to_string(),
            table_type.to_string(),
        ));
        self
    }

    pub fn with_column(
        mut self,
        catalog: &str,
        schema: &str,
        table: &str,
        name: &str,
        data_type: &str,
        is_nullable: &str,
    ) -> Self {
        self.columns.push(StoredColumn {
            catalog: catalog.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
            name: name.to_string(),
            data_type: data_type.to_string(),
            is_nullable: is_nullable.to_string(),
        });
        self
    }

    /// Answer with bare tuples instead of named rows
    pub fn with_positional_rows(mut self) -> Self {
        self.positional_rows = true;
        self
    }

    pub fn register_temp_view(&self, name: &str, columns: &[&str]) {
        self.temp_views
            .register(name, columns.iter().map(|c| c.to_string()).collect());
    }

    pub fn drop_temp_view(&self, name: &str) -> bool {
        self.temp_views.drop_view(name)
    }

    /// Make every following call fail with `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    pub fn current(&self) -> (String, String) {
        self.current.lock().clone()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn clear_sent(&self) {
        self.sent.lock().clear();
    }

    /// Queries received, in order
    pub fn queries(&self) -> Vec<Select> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Query(q) => Some(q),
                Sent::Statement(_) => None,
            })
            .collect()
    }

    /// Metadata queries (those reading a view) rendered as SQL text
    pub fn metadata_sql(&self) -> Vec<String> {
        self.queries()
            .iter()
            .filter(|q| q.from.is_some())
            .map(|q| q.to_sql(self.dialects.execution, true))
            .collect()
    }

    /// Statements received, rendered as SQL text
    pub fn statements(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Statement(st) => Some(st.to_sql(self.dialects.execution)),
                Sent::Query(_) => None,
            })
            .collect()
    }

    fn check_failure(&self) -> CatalogResult<()> {
        match self.failure.lock().as_ref() {
            Some(message) => Err(CatalogError::ExecutionFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn records(&self, view: &str) -> Vec<Record> {
        match view {
            "schemata" => self
                .schemata
                .iter()
                .map(|(catalog, schema)| {
                    Record::from([
                        ("catalog_name", catalog.clone()),
                        ("schema_name", schema.clone()),
                    ])
                })
                .collect(),
            "tables" => self
                .tables
                .iter()
                .map(|(catalog, schema, name, table_type)| {
                    Record::from([
                        ("table_catalog", catalog.clone()),
                        ("table_schema", schema.clone()),
                        ("table_name", name.clone()),
                        ("table_type", table_type.clone()),
                    ])
                })
                .collect(),
            "columns" => self
                .columns
                .iter()
                .map(|c| {
                    Record::from([
                        ("table_catalog", c.catalog.clone()),
                        ("table_schema", c.schema.clone()),
                        ("table_name", c.table.clone()),
                        ("column_name", c.name.clone()),
                        ("data_type", c.data_type.clone()),
                        ("is_nullable", c.is_nullable.clone()),
                    ])
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn evaluate(&self, expr: &Expr, record: &Record) -> Value {
        match expr {
            Expr::Column(name) => record
                .get(name.to_lowercase().as_str())
                .map(|v| Value::String(v.clone()))
                .unwrap_or(Value::Null),
            Expr::Literal(value) => Value::String(value.clone()),
            Expr::Function { name, .. } => {
                let current = self.current.lock();
                let value = if name == &self.catalog_function {
                    current.0.clone()
                } else if name == &self.database_function {
                    current.1.clone()
                } else {
                    String::new()
                };
                if value.is_empty() {
                    Value::Null
                } else {
                    Value::String(value)
                }
            }
            Expr::Eq(left, right) => {
                Value::Boolean(self.evaluate(left, record) == self.evaluate(right, record))
            }
            Expr::Like(left, right) => {
                let matched = match (self.evaluate(left, record), self.evaluate(right, record)) {
                    (Value::String(text), Value::String(pattern)) => like(&pattern).is_match(&text),
                    _ => false,
                };
                Value::Boolean(matched)
            }
            Expr::Or(left, right) => Value::Boolean(
                self.evaluate(left, record) == Value::Boolean(true)
                    || self.evaluate(right, record) == Value::Boolean(true),
            ),
        }
    }
}

impl CatalogSession for MockSession {
    fn fetch_rows(&self, query: &Select, _quote_identifiers: bool) -> CatalogResult<Vec<Row>> {
        self.sent.lock().push(Sent::Query(query.clone()));
        self.check_failure()?;

        let records = match &query.from {
            Some(view) => {
                let name = view.name().map(|i| i.name.to_lowercase()).unwrap_or_default();
                self.records(&name)
            }
            None => vec![Record::new()],
        };

        let columns = if self.positional_rows {
            Vec::new()
        } else {
            query.output_names()
        };
        let mut rows: Vec<Row> = Vec::new();
        for record in records {
            let keep = query
                .filters
                .iter()
                .all(|f| self.evaluate(f, &record) == Value::Boolean(true));
            if !keep {
                continue;
            }
            let values = query
                .projections
                .iter()
                .map(|p| self.evaluate(&p.expr, &record))
                .collect();
            let row = Row::new(columns.clone(), values);
            if query.distinct && rows.contains(&row) {
                continue;
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn execute(&self, statement: &Statement) -> CatalogResult<()> {
        self.sent.lock().push(Sent::Statement(statement.clone()));
        self.check_failure()?;

        let mut current = self.current.lock();
        match statement {
            Statement::Use { kind, name } => {
                let parts: Vec<String> = name.parts.iter().map(|p| p.name.clone()).collect();
                let catalog_kind = matches!(kind.as_deref(), Some("CATALOG") | Some("DATABASE"));
                match parts.as_slice() {
                    [single] if catalog_kind => current.0 = single.clone(),
                    [catalog, database] if kind.is_none() => {
                        *current = (catalog.clone(), database.clone());
                    }
                    [single] if kind.is_none() && self.schemata.iter().any(|(c, _)| c == single) => {
                        current.0 = single.clone();
                    }
                    [single] if kind.is_none() => current.1 = single.clone(),
                    _ => {
                        return Err(CatalogError::ExecutionFailed(format!(
                            "cannot USE {}",
                            statement.to_sql(self.dialects.execution)
                        )))
                    }
                }
            }
            Statement::Raw(text) => {
                let set = Regex::new(r#"^SET (\w+) TO "((?:[^"]|"")*)"$"#)
                    .expect("valid SET pattern");
                match set.captures(text) {
                    Some(caps) => current.1 = caps[2].replace("\"\"", "\""),
                    None => {
                        return Err(CatalogError::ExecutionFailed(format!(
                            "syntax error at or near \"{}\"",
                            text
                        )))
                    }
                }
            }
        }
        Ok(())
    }

    fn dialects(&self) -> DialectSpaces {
        self.dialects
    }

    fn temp_views(&self) -> &dyn TempViewRegistry {
        &self.temp_views
    }
}

/// SQL LIKE as an anchored regex
fn like(pattern: &str) -> Regex {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '%' => re.push_str(".*"),
            '_' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).expect("valid LIKE pattern")
}

/// Spark in and out, `execution` underneath
pub fn spark_over(execution: Dialect) -> DialectSpaces {
    DialectSpaces::new(Dialect::Spark, execution, Dialect::Spark)
}
