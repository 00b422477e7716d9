//! Function and aggregate catalogues (§3.4): process-wide immutable
//! tables, read without synchronization and never mutated after the
//! first parse (§5).

use crate::ast::ValueType;

/// A function signature. `variadic_modifier = Some(k)` means the final
/// `k` arg types may repeat; the minimum arg count is
/// `arg_types.len() - k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Function {
    pub name: &'static str,
    pub arg_types: &'static [ValueType],
    pub variadic_modifier: Option<u32>,
    pub return_type: ValueType,
}

impl Function {
    pub fn min_args(&self) -> usize {
        match self.variadic_modifier {
            None => self.arg_types.len(),
            Some(k) => self.arg_types.len().saturating_sub(k as usize),
        }
    }

    /// `None` means unbounded — a `Some(k)` modifier lets the final `k`
    /// arg types repeat without limit.
    pub fn max_args(&self) -> Option<usize> {
        match self.variadic_modifier {
            None => Some(self.arg_types.len()),
            Some(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOperator {
    Sum,
    Avg,
    Max,
    Min,
    Count,
    Stddev,
    Stdvar,
    Group,
    Topk,
    Bottomk,
    Quantile,
    CountValues,
    Limitk,
    LimitRatio,
}

impl AggregateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateOperator::Sum => "sum",
            AggregateOperator::Avg => "avg",
            AggregateOperator::Max => "max",
            AggregateOperator::Min => "min",
            AggregateOperator::Count => "count",
            AggregateOperator::Stddev => "stddev",
            AggregateOperator::Stdvar => "stdvar",
            AggregateOperator::Group => "group",
            AggregateOperator::Topk => "topk",
            AggregateOperator::Bottomk => "bottomk",
            AggregateOperator::Quantile => "quantile",
            AggregateOperator::CountValues => "count_values",
            AggregateOperator::Limitk => "limitk",
            AggregateOperator::LimitRatio => "limit_ratio",
        }
    }

    pub fn parameter_type(self) -> Option<ValueType> {
        match self {
            AggregateOperator::Topk | AggregateOperator::Bottomk | AggregateOperator::Quantile => {
                Some(ValueType::Scalar)
            }
            AggregateOperator::CountValues => Some(ValueType::String),
            AggregateOperator::Limitk | AggregateOperator::LimitRatio => Some(ValueType::Scalar),
            _ => None,
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Some(match lower.as_str() {
            "sum" => AggregateOperator::Sum,
            "avg" => AggregateOperator::Avg,
            "max" => AggregateOperator::Max,
            "min" => AggregateOperator::Min,
            "count" => AggregateOperator::Count,
            "stddev" => AggregateOperator::Stddev,
            "stdvar" => AggregateOperator::Stdvar,
            "group" => AggregateOperator::Group,
            "topk" => AggregateOperator::Topk,
            "bottomk" => AggregateOperator::Bottomk,
            "quantile" => AggregateOperator::Quantile,
            "count_values" => AggregateOperator::CountValues,
            "limitk" => AggregateOperator::Limitk,
            "limit_ratio" => AggregateOperator::LimitRatio,
            _ => return None,
        })
    }
}

macro_rules! func {
    ($name:expr, [$($arg:expr),*], $variadic:expr, $ret:expr) => {
        Function {
            name: $name,
            arg_types: &[$($arg),*],
            variadic_modifier: $variadic,
            return_type: $ret,
        }
    };
}

use ValueType::{Matrix, Scalar, String as Str, Vector};

/// The full builtin catalogue, ported verbatim (names/arities/types) from
/// the reference implementation — data, not logic under redesign (§9).
pub static FUNCTIONS: &[Function] = &[
    // Math functions
    func!("abs", [Vector], None, Vector),
    func!("ceil", [Vector], None, Vector),
    func!("floor", [Vector], None, Vector),
    func!("exp", [Vector], None, Vector),
    func!("sqrt", [Vector], None, Vector),
    func!("ln", [Vector], None, Vector),
    func!("log2", [Vector], None, Vector),
    func!("log10", [Vector], None, Vector),
    func!("sgn", [Vector], None, Vector),
    func!("deg", [Vector], None, Vector),
    func!("rad", [Vector], None, Vector),
    // Trigonometric functions
    func!("acos", [Vector], None, Vector),
    func!("acosh", [Vector], None, Vector),
    func!("asin", [Vector], None, Vector),
    func!("asinh", [Vector], None, Vector),
    func!("atan", [Vector], None, Vector),
    func!("atanh", [Vector], None, Vector),
    func!("cos", [Vector], None, Vector),
    func!("cosh", [Vector], None, Vector),
    func!("sin", [Vector], None, Vector),
    func!("sinh", [Vector], None, Vector),
    func!("tan", [Vector], None, Vector),
    func!("tanh", [Vector], None, Vector),
    // Rounding/clamping functions
    func!("round", [Vector, Scalar], Some(1), Vector),
    func!("clamp", [Vector, Scalar, Scalar], None, Vector),
    func!("clamp_min", [Vector, Scalar], None, Vector),
    func!("clamp_max", [Vector, Scalar], None, Vector),
    // Sorting functions
    func!("sort", [Vector], None, Vector),
    func!("sort_desc", [Vector], None, Vector),
    func!("sort_by_label", [Vector, Str], Some(1), Vector),
    func!("sort_by_label_desc", [Vector, Str], Some(1), Vector),
    // Rate/counter functions (range vector -> instant vector)
    func!("rate", [Matrix], None, Vector),
    func!("irate", [Matrix], None, Vector),
    func!("increase", [Matrix], None, Vector),
    func!("delta", [Matrix], None, Vector),
    func!("idelta", [Matrix], None, Vector),
    func!("deriv", [Matrix], None, Vector),
    func!("changes", [Matrix], None, Vector),
    func!("resets", [Matrix], None, Vector),
    // Over-time aggregation functions (range vector -> instant vector)
    func!("avg_over_time", [Matrix], None, Vector),
    func!("sum_over_time", [Matrix], None, Vector),
    func!("count_over_time", [Matrix], None, Vector),
    func!("min_over_time", [Matrix], None, Vector),
    func!("max_over_time", [Matrix], None, Vector),
    func!("stddev_over_time", [Matrix], None, Vector),
    func!("stdvar_over_time", [Matrix], None, Vector),
    func!("last_over_time", [Matrix], None, Vector),
    func!("present_over_time", [Matrix], None, Vector),
    func!("absent_over_time", [Matrix], None, Vector),
    func!("quantile_over_time", [Scalar, Matrix], None, Vector),
    func!("first_over_time", [Matrix], None, Vector),
    func!("mad_over_time", [Matrix], None, Vector),
    // Timestamp-of functions
    func!("ts_of_first_over_time", [Matrix], None, Vector),
    func!("ts_of_max_over_time", [Matrix], None, Vector),
    func!("ts_of_min_over_time", [Matrix], None, Vector),
    func!("ts_of_last_over_time", [Matrix], None, Vector),
    // Time functions
    func!("time", [], None, Scalar),
    func!("timestamp", [Vector], None, Vector),
    func!("hour", [Vector], Some(1), Vector),
    func!("minute", [Vector], Some(1), Vector),
    func!("month", [Vector], Some(1), Vector),
    func!("year", [Vector], Some(1), Vector),
    func!("day_of_week", [Vector], Some(1), Vector),
    func!("day_of_month", [Vector], Some(1), Vector),
    func!("day_of_year", [Vector], Some(1), Vector),
    func!("days_in_month", [Vector], Some(1), Vector),
    // Label functions
    func!("label_replace", [Vector, Str, Str, Str, Str], None, Vector),
    func!("label_join", [Vector, Str, Str, Str], Some(1), Vector),
    // Other functions
    func!("absent", [Vector], None, Vector),
    func!("scalar", [Vector], None, Scalar),
    func!("vector", [Scalar], None, Vector),
    func!("predict_linear", [Matrix, Scalar], None, Vector),
    func!("pi", [], None, Scalar),
    // Histogram functions
    func!("histogram_quantile", [Scalar, Vector], None, Vector),
    func!("histogram_avg", [Vector], None, Vector),
    func!("histogram_count", [Vector], None, Vector),
    func!("histogram_sum", [Vector], None, Vector),
    func!("histogram_stddev", [Vector], None, Vector),
    func!("histogram_stdvar", [Vector], None, Vector),
    func!("histogram_fraction", [Scalar, Scalar, Vector], None, Vector),
    func!("double_exponential_smoothing", [Matrix, Scalar, Scalar], None, Vector),
    // Info function
    func!("info", [Vector, Vector], Some(1), Vector),
];

pub fn get_function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

pub fn is_function(name: &str) -> bool {
    get_function(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_functions() {
        assert!(get_function("rate").is_some());
        assert!(get_function("abs").is_some());
        assert!(get_function("nonexistent").is_none());
    }

    #[test]
    fn min_args_matches_catalogue_shape() {
        let rate = get_function("rate").unwrap();
        assert_eq!(rate.min_args(), 1);

        let round = get_function("round").unwrap();
        assert_eq!(round.min_args(), 1);

        let label_join = get_function("label_join").unwrap();
        assert_eq!(label_join.min_args(), 3);

        let time = get_function("time").unwrap();
        assert_eq!(time.min_args(), 0);
    }

    #[test]
    fn aggregate_parameter_types_match_spec() {
        assert_eq!(AggregateOperator::Quantile.parameter_type(), Some(ValueType::Scalar));
        assert_eq!(AggregateOperator::CountValues.parameter_type(), Some(ValueType::String));
        assert_eq!(AggregateOperator::Topk.parameter_type(), Some(ValueType::Scalar));
        assert_eq!(AggregateOperator::Sum.parameter_type(), None);
    }

    #[test]
    fn aggregate_lookup_is_case_insensitive() {
        assert_eq!(AggregateOperator::lookup("SUM"), Some(AggregateOperator::Sum));
        assert_eq!(AggregateOperator::lookup("not_an_aggregate"), None);
    }
}
