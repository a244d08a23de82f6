//! Capability table: which operations are available on an expression, decided by
//! predicates over its data shape.

use crate::datashape::DataShape;
use crate::expr::{Expr, ExprError};
use crate::split_apply_combine::count_values;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// Operations that are attached to expressions only when their shape qualifies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Any,
    All,
    Sum,
    Min,
    Max,
    Mean,
    Var,
    Std,
    Count,
    Nunique,
    IsNan,
    CountValues,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Any => "any",
            Operation::All => "all",
            Operation::Sum => "sum",
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Mean => "mean",
            Operation::Var => "var",
            Operation::Std => "std",
            Operation::Count => "count",
            Operation::Nunique => "nunique",
            Operation::IsNan => "isnan",
            Operation::CountValues => "count_values",
        };
        write!(f, "{name}")
    }
}

pub type Predicate = fn(&DataShape) -> bool;

/// A closed mapping from shape predicates to the operations they enable.
///
/// Schema rules are tested against the per-element shape, shape rules against the
/// whole data shape. The operations of all matching rules are combined.
#[derive(Clone, Default)]
pub struct CapabilityTable {
    schema_rules: Vec<(Predicate, Vec<Operation>)>,
    dshape_rules: Vec<(Predicate, Vec<Operation>)>,
}

impl CapabilityTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> CapabilityTable {
        CapabilityTable::default()
    }

    /// The built-in table, initialized on first use.
    pub fn standard() -> &'static CapabilityTable {
        static TABLE: OnceLock<CapabilityTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            use Operation::*;
            CapabilityTable::new()
                .with_schema_rule(DataShape::is_boolean, &[Any, All, Sum])
                .with_schema_rule(DataShape::is_numeric, &[Mean, Sum, Min, Max, Std, Var])
                .with_schema_rule(DataShape::is_real, &[IsNan])
                .with_dshape_rule(DataShape::is_collection, &[Count, Min, Max])
                .with_dshape_rule(|dshape| dshape.ndim() == 1, &[Nunique, CountValues])
        })
    }

    #[must_use]
    pub fn with_schema_rule(mut self, predicate: Predicate, operations: &[Operation]) -> Self {
        self.schema_rules.push((predicate, operations.to_vec()));
        self
    }

    #[must_use]
    pub fn with_dshape_rule(mut self, predicate: Predicate, operations: &[Operation]) -> Self {
        self.dshape_rules.push((predicate, operations.to_vec()));
        self
    }

    /// All operations available for the given shape.
    #[must_use]
    pub fn operations(&self, dshape: &DataShape) -> BTreeSet<Operation> {
        let schema = dshape.schema();
        let by_schema = self
            .schema_rules
            .iter()
            .filter(|(predicate, _)| predicate(&schema));
        let by_dshape = self
            .dshape_rules
            .iter()
            .filter(|(predicate, _)| predicate(dshape));
        by_schema
            .chain(by_dshape)
            .flat_map(|(_, operations)| operations.iter().copied())
            .collect()
    }

    #[must_use]
    pub fn supports(&self, dshape: &DataShape, operation: Operation) -> bool {
        self.operations(dshape).contains(&operation)
    }

    /// Build `operation` over `expr`, if the table makes it available.
    ///
    /// `var` and `std` use the population (biased) estimate.
    pub fn apply(&self, operation: Operation, expr: &Expr) -> Result<Expr, ExprError> {
        if !self.supports(expr.dshape(), operation) {
            return Err(ExprError::UnsupportedOperation {
                operation,
                dshape: expr.dshape().to_string(),
            });
        }
        match operation {
            Operation::Any => expr.any(),
            Operation::All => expr.all(),
            Operation::Sum => expr.sum(),
            Operation::Min => expr.min(),
            Operation::Max => expr.max(),
            Operation::Mean => expr.mean(),
            Operation::Var => expr.var(false),
            Operation::Std => expr.std(false),
            Operation::Count => expr.count(),
            Operation::Nunique => expr.nunique(),
            Operation::IsNan => expr.isnan(),
            Operation::CountValues => count_values(expr, true),
        }
    }
}

impl Expr {
    /// Operations of the standard [`CapabilityTable`] available for this expression.
    #[must_use]
    pub fn operations(&self) -> BTreeSet<Operation> {
        CapabilityTable::standard().operations(self.dshape())
    }
}
