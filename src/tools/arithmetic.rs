//! Pure arithmetic computations and their catalog registrations.
//!
//! Every function is stateless and deterministic. Failure behavior is
//! deliberate: division by zero, domain violations, and integer overflow are
//! not guarded up front, they surface as [`ComputeError`] and reach the wire
//! as internal errors.

use crate::catalog::{
    builder::{CatalogBuilder, CatalogError},
    registry::Catalog,
    types::{Num, ParamSpec, PromptSpec, ResourceSpec, ReturnKind, TemplateSpec, ToolFn, ToolSpec, ValueKind},
};
use crate::lib::errors::ComputeError;

pub fn add(a: i64, b: i64) -> Result<Num, ComputeError> {
    a.checked_add(b)
        .map(Num::Int)
        .ok_or(ComputeError::Overflow { operation: "add" })
}

pub fn subtract(a: i64, b: i64) -> Result<Num, ComputeError> {
    a.checked_sub(b)
        .map(Num::Int)
        .ok_or(ComputeError::Overflow {
            operation: "subtract",
        })
}

pub fn multiply(a: i64, b: i64) -> Result<Num, ComputeError> {
    a.checked_mul(b)
        .map(Num::Int)
        .ok_or(ComputeError::Overflow {
            operation: "multiply",
        })
}

pub fn divide(a: i64, b: i64) -> Result<Num, ComputeError> {
    if b == 0 {
        return Err(ComputeError::DivisionByZero);
    }
    Ok(Num::Float(a as f64 / b as f64))
}

/// `a ** b`. A non-negative exponent stays in checked integer arithmetic; a
/// negative exponent produces a float quotient that the declared integer
/// return kind truncates toward zero.
pub fn power(a: i64, b: i64) -> Result<Num, ComputeError> {
    if b >= 0 {
        let exponent = u32::try_from(b).map_err(|_| ComputeError::Overflow { operation: "power" })?;
        return a
            .checked_pow(exponent)
            .map(Num::Int)
            .ok_or(ComputeError::Overflow { operation: "power" });
    }
    if a == 0 {
        return Err(ComputeError::DivisionByZero);
    }
    Ok(Num::Float((a as f64).powf(b as f64)))
}

pub fn sqrt(a: i64) -> Result<Num, ComputeError> {
    if a < 0 {
        return Err(ComputeError::Domain { operation: "sqrt" });
    }
    Ok(Num::Float((a as f64).sqrt()))
}

pub fn cbrt(a: i64) -> Result<Num, ComputeError> {
    // The reference computes a ** (1/3), which is undefined for negative
    // bases, not a signed cube root.
    if a < 0 {
        return Err(ComputeError::Domain { operation: "cbrt" });
    }
    Ok(Num::Float((a as f64).powf(1.0 / 3.0)))
}

pub fn factorial(a: i64) -> Result<Num, ComputeError> {
    if a < 0 {
        return Err(ComputeError::Domain {
            operation: "factorial",
        });
    }
    let mut product: i64 = 1;
    for factor in 2..=a {
        product = product
            .checked_mul(factor)
            .ok_or(ComputeError::Overflow {
                operation: "factorial",
            })?;
    }
    Ok(Num::Int(product))
}

pub fn log(a: i64) -> Result<Num, ComputeError> {
    if a <= 0 {
        return Err(ComputeError::Domain { operation: "log" });
    }
    Ok(Num::Float((a as f64).ln()))
}

/// Floored modulo: the result takes the sign of `b`.
pub fn remainder(a: i64, b: i64) -> Result<Num, ComputeError> {
    if b == 0 {
        return Err(ComputeError::DivisionByZero);
    }
    let raw = a.checked_rem(b).ok_or(ComputeError::Overflow {
        operation: "remainder",
    })?;
    let floored = if raw != 0 && (raw < 0) != (b < 0) {
        raw + b
    } else {
        raw
    };
    Ok(Num::Int(floored))
}

pub fn sin(a: i64) -> Result<Num, ComputeError> {
    Ok(Num::Float((a as f64).sin()))
}

pub fn cos(a: i64) -> Result<Num, ComputeError> {
    Ok(Num::Float((a as f64).cos()))
}

pub fn tan(a: i64) -> Result<Num, ComputeError> {
    Ok(Num::Float((a as f64).tan()))
}

fn binary_tool(
    name: &'static str,
    description: &'static str,
    returns: ReturnKind,
    compute: fn(i64, i64) -> Result<Num, ComputeError>,
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        params: vec![
            ParamSpec::new("a", ValueKind::Integer),
            ParamSpec::new("b", ValueKind::Integer),
        ],
        returns,
        handler: ToolFn::Binary(compute),
    }
}

fn unary_tool(
    name: &'static str,
    description: &'static str,
    returns: ReturnKind,
    compute: fn(i64) -> Result<Num, ComputeError>,
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        params: vec![ParamSpec::new("a", ValueKind::Integer)],
        returns,
        handler: ToolFn::Unary(compute),
    }
}

fn render_greeting(values: &crate::catalog::types::TemplateValues) -> String {
    format!(
        "Hello {}! Welcome to MCP.",
        values.get("name").map(String::as_str).unwrap_or_default()
    )
}

fn render_review_code(values: &crate::catalog::types::TemplateValues) -> String {
    format!(
        "Please review this code:\n\n{}",
        values.get("code").map(String::as_str).unwrap_or_default()
    )
}

/// Build the full catalog this server exposes, in registration order.
pub fn standard_catalog() -> Result<Catalog, CatalogError> {
    CatalogBuilder::new()
        .tool(binary_tool("add", "Add two numbers", ReturnKind::Integer, add))
        .tool(binary_tool(
            "subtract",
            "Subtract two numbers",
            ReturnKind::Integer,
            subtract,
        ))
        .tool(binary_tool(
            "multiply",
            "Multiply two numbers",
            ReturnKind::Integer,
            multiply,
        ))
        .tool(binary_tool(
            "divide",
            "Divide two numbers",
            ReturnKind::Float,
            divide,
        ))
        .tool(binary_tool(
            "power",
            "Power of two numbers",
            ReturnKind::Integer,
            power,
        ))
        .tool(unary_tool(
            "sqrt",
            "Square root of a number",
            ReturnKind::Float,
            sqrt,
        ))
        .tool(unary_tool(
            "cbrt",
            "Cube root of a number",
            ReturnKind::Float,
            cbrt,
        ))
        .tool(unary_tool(
            "factorial",
            "Factorial of a number",
            ReturnKind::Integer,
            factorial,
        ))
        .tool(unary_tool("log", "Log of a number", ReturnKind::Float, log))
        .tool(binary_tool(
            "remainder",
            "Remainder of two numbers division",
            ReturnKind::Integer,
            remainder,
        ))
        .tool(unary_tool("sin", "Sin of a number", ReturnKind::Float, sin))
        .tool(unary_tool("cos", "Cos of a number", ReturnKind::Float, cos))
        .tool(unary_tool("tan", "Tan of a number", ReturnKind::Float, tan))
        .static_resource(ResourceSpec {
            uri: "hello://world",
            name: "Hello World Message",
            description: "A simple hello world message",
            mime_type: "text/plain",
            text: "Hello, World!",
        })
        .template_resource(TemplateSpec {
            uri: "greeting://{name}",
            name: "Personalized Greeting",
            description: "A personalized greeting message",
            mime_type: "text/plain",
            params: vec![ParamSpec::described(
                "name",
                ValueKind::Text,
                "The name of the person to greet",
            )],
            render: render_greeting,
        })
        .prompt(PromptSpec {
            name: "review_code",
            description: "Review code",
            params: vec![ParamSpec::new("code", ValueKind::Text)],
            render: render_review_code,
        })
        .build()
}
