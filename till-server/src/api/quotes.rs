//! Quote API 模块
//!
//! Stateless pricing: lines in, per-line figures and totals out. No shared
//! cart state is touched, so concurrent requests are naturally isolated
//! from each other.

use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::transaction::{Discount, LinePricingInput};

use crate::core::ServerState;
use crate::pricing::{self, LineCalculationResult, TransactionCalculationResult};
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/quotes", post(create_quote))
}

/// Quote request payload
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub lines: Vec<LinePricingInput>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub shipping_charge: f64,
}

/// Quote response payload
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub lines: Vec<LineCalculationResult>,
    pub totals: TransactionCalculationResult,
    /// Non-fatal warnings (e.g. a discount exceeding its basis)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// POST /api/quotes - 计算报价
async fn create_quote(Json(req): Json<QuoteRequest>) -> AppResult<Json<QuoteResponse>> {
    let (lines, totals) =
        pricing::price_transaction(&req.lines, &req.discount, req.shipping_charge)?;

    let mut warnings = Vec::new();
    if lines.iter().any(|l| l.subtotal < Decimal::ZERO) {
        warnings.push("NEGATIVE_LINE_SUBTOTAL".to_string());
    }
    if totals.is_negative() {
        warnings.push("NEGATIVE_TOTAL".to_string());
    }

    Ok(Json(QuoteResponse {
        lines,
        totals,
        warnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_defaults() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{"lines": [{"unit_price": 29.99, "quantity": 1, "tax_rate_percent": 10}]}"#,
        )
        .unwrap();

        assert_eq!(req.lines.len(), 1);
        assert!(req.discount.is_none());
        assert_eq!(req.shipping_charge, 0.0);
    }

    #[test]
    fn test_quote_response_serializes_decimals_as_numbers() {
        let (lines, totals) = pricing::price_transaction(
            &[LinePricingInput {
                unit_price: 29.99,
                quantity: 1,
                tax_rate_percent: 10.0,
                discount: Discount::none(),
            }],
            &Discount::none(),
            0.0,
        )
        .unwrap();

        let response = QuoteResponse {
            lines,
            totals,
            warnings: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["totals"]["subtotal"], serde_json::json!(29.99));
        assert_eq!(json["totals"]["grand_total"], serde_json::json!(32.989));
        // Empty warnings are omitted from the payload
        assert!(json.get("warnings").is_none());
    }
}
