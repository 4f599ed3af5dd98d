//! Expression command descriptors and the built-in command table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for one expression-language command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Command name
    pub name: String,
    /// Call signature
    pub signature: String,
    /// Command category (numeric, string, datetime, control, conversion)
    pub category: String,
    /// Human-readable description
    pub help: String,
}

impl CommandDescriptor {
    /// Create a command descriptor.
    pub fn new(name: &str, signature: &str, category: &str, help: &str) -> Self {
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
            category: category.to_string(),
            help: help.to_string(),
        }
    }

    /// Flatten to the string-to-string record shape of the public surface.
    pub fn to_record(&self) -> HashMap<String, String> {
        let mut record = HashMap::new();
        record.insert("name".to_string(), self.name.clone());
        record.insert("signature".to_string(), self.signature.clone());
        record.insert("category".to_string(), self.category.clone());
        record.insert("help".to_string(), self.help.clone());
        record
    }
}

/// Built-in command table: (name, signature, category, help).
const BUILTIN_COMMANDS: &[(&str, &str, &str, &str)] = &[
    ("abs", "abs(x)", "numeric", "Absolute value of x"),
    ("avg", "avg(x, y, ...)", "numeric", "Average of all inputs"),
    ("bucket", "bucket(x, y)", "numeric", "Bucket x by interval y"),
    ("ceil", "ceil(x)", "numeric", "Smallest integer not less than x"),
    ("exp", "exp(x)", "numeric", "Natural exponent of x"),
    ("floor", "floor(x)", "numeric", "Largest integer not greater than x"),
    ("frac", "frac(x)", "numeric", "Fractional portion of x"),
    ("inrange", "inrange(low, x, high)", "numeric", "Whether x lies between low and high"),
    ("log", "log(x)", "numeric", "Natural logarithm of x"),
    ("log10", "log10(x)", "numeric", "Base-10 logarithm of x"),
    ("log2", "log2(x)", "numeric", "Base-2 logarithm of x"),
    ("max", "max(x, y, ...)", "numeric", "Largest of all inputs"),
    ("min", "min(x, y, ...)", "numeric", "Smallest of all inputs"),
    ("percent_of", "percent_of(x, y)", "numeric", "Percent x is of y"),
    ("pow", "pow(x, y)", "numeric", "x raised to the power y"),
    ("round", "round(x)", "numeric", "Round x to the nearest integer"),
    ("sqrt", "sqrt(x)", "numeric", "Square root of x"),
    ("trunc", "trunc(x)", "numeric", "Integer portion of x"),
    ("concat", "concat(x, y, ...)", "string", "Concatenate string columns and literals"),
    ("length", "length(x)", "string", "Length of the string x"),
    ("lower", "lower(x)", "string", "Lowercase of x"),
    ("match", "match(x, pattern)", "string", "Whether x matches the regex pattern"),
    ("order", "order(x, ...)", "string", "Custom sort order for a string column"),
    ("replace", "replace(x, pattern, y)", "string", "Replace the first match of pattern in x with y"),
    ("upper", "upper(x)", "string", "Uppercase of x"),
    ("date", "date(year, month, day)", "datetime", "Construct a date"),
    ("datetime", "datetime(timestamp)", "datetime", "Construct a datetime from a POSIX timestamp"),
    ("day_of_week", "day_of_week(x)", "datetime", "Day of week of the datetime x"),
    ("hour_of_day", "hour_of_day(x)", "datetime", "Hour of day of the datetime x"),
    ("month_of_year", "month_of_year(x)", "datetime", "Month of year of the datetime x"),
    ("now", "now()", "datetime", "The current datetime"),
    ("today", "today()", "datetime", "The current date"),
    ("if", "if (condition) {...} else {...}", "control", "Conditional branch"),
    ("for", "for (...) {...}", "control", "Loop over a range"),
    ("var", "var x := expr", "control", "Declare a local variable"),
    ("boolean", "boolean(x)", "conversion", "Cast x to a boolean"),
    ("float", "float(x)", "conversion", "Cast x to a float"),
    ("integer", "integer(x)", "conversion", "Cast x to an integer"),
    ("string", "string(x)", "conversion", "Cast x to a string"),
];

/// Materialize the built-in command table.
pub(crate) fn builtin_commands() -> Vec<CommandDescriptor> {
    BUILTIN_COMMANDS
        .iter()
        .map(|(name, signature, category, help)| {
            CommandDescriptor::new(name, signature, category, help)
        })
        .collect()
}
