use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::DateRange,
    utils::{
        cash::{
            ClosingSheet, Currency, closing_totals, currency_total, grand_total_qar,
            parse_signed_amount, round_cents,
        },
        overtime::{
            MAX_SHEET_DAYS, day_headers, fit_days, overtime_amount, parse_any_number, total_hours,
        },
        tafqit::{MAX_AMOUNT, amount_in_words},
    },
};

#[derive(Deserialize, ToSchema)]
pub struct TafqitRequest {
    /// As typed on the form; Arabic-Indic digits are accepted, fractions are dropped
    #[schema(example = "1250")]
    pub amount: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TafqitResponse {
    #[schema(example = 1250)]
    pub amount: u64,
    #[schema(example = "ألف ومائتان وخمسون ريال قطري لا غير")]
    pub words: String,
}

#[derive(Deserialize, ToSchema)]
pub struct OvertimeRequest {
    /// Monthly salary as typed
    #[schema(example = "6000")]
    pub salary: String,
    /// Hours per day cell, as typed
    #[schema(example = json!(["2", "٣", "0"]))]
    pub days: Vec<String>,
    /// With `to`, sizes the row to the sheet period and adds weekday headers
    #[schema(example = "2024-02-01", format = "date", value_type = Option<String>)]
    pub from: Option<NaiveDate>,
    #[schema(example = "2024-02-29", format = "date", value_type = Option<String>)]
    pub to: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct OvertimeResponse {
    pub days: Vec<String>,
    /// Arabic weekday per day cell, empty without a period
    pub headers: Vec<String>,
    #[schema(example = 5.0)]
    pub total_hours: f64,
    #[schema(example = 188)]
    pub amount: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct CashRequest {
    /// Currency code to `denomination -> note count`, counts as typed
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"QAR": {"500": "2", "1": "3"}, "KWD": {"0.5": "4"}}))]
    pub counts: HashMap<Currency, HashMap<String, String>>,
    /// ATM takings in riyal, as typed
    #[serde(default)]
    #[schema(example = "1500")]
    pub atm: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CurrencyTotal {
    pub currency: Currency,
    #[schema(example = "دينار كويتي")]
    pub name: String,
    /// Total in the currency itself
    #[schema(example = 2.0)]
    pub total: f64,
    #[schema(example = 10.5)]
    pub rate: f64,
    #[schema(example = 21.0)]
    pub total_qar: f64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CashResponse {
    /// Every currency on the sheet, uncounted ones at zero
    pub currencies: Vec<CurrencyTotal>,
    #[schema(example = 1024.0)]
    pub grand_total_qar: f64,
    #[schema(example = 1500.0)]
    pub atm: f64,
    /// Riyal grand total plus ATM
    #[schema(example = 2524.0)]
    pub total_daily_amount: f64,
}

/// Cells of the daily closing sheet, as typed. Blank cells count as 0.
#[derive(Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct ClosingRequest {
    #[schema(example = "1000")]
    pub cargo_atm_1: String,
    pub cargo_atm_2: String,
    #[schema(example = "400")]
    pub cargo_cash_1: String,
    pub cargo_cash_2: String,
    #[schema(example = "5,000")]
    pub total_atm: String,
    #[schema(example = "3,000")]
    pub total_cash: String,
    #[schema(example = "12")]
    pub cars_tourist: String,
    #[schema(example = "5")]
    pub cars_cargo: String,
}

fn finite(value: f64) -> Result<f64, AppError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::BadRequest("Amount is too large".to_string()))
    }
}

fn typed_amount(raw: &str) -> Result<f64, AppError> {
    finite(parse_signed_amount(raw))
}

#[utoipa::path(
    post,
    path = "/api/v1/tools/tafqit",
    request_body = TafqitRequest,
    responses(
        (status = 200, description = "Amount written out in Arabic with the riyal suffix", body = TafqitResponse),
        (status = 400, description = "Amount out of range")
    ),
    tag = "Tools"
)]
pub async fn tafqit(payload: web::Json<TafqitRequest>) -> actix_web::Result<impl Responder> {
    let amount = parse_any_number(&payload.amount).trunc() as u64;
    let words = amount_in_words(amount).ok_or_else(|| {
        AppError::BadRequest(format!("Amount must not exceed {}", MAX_AMOUNT))
    })?;
    Ok(HttpResponse::Ok().json(TafqitResponse { amount, words }))
}

#[utoipa::path(
    post,
    path = "/api/v1/tools/overtime",
    request_body = OvertimeRequest,
    responses(
        (status = 200, description = "Total hours and overtime pay at time and a half", body = OvertimeResponse),
        (status = 400, description = "Sheet period longer than a year", body = Object, example = json!({
            "message": "Sheet period must not exceed 366 days"
        }))
    ),
    tag = "Tools"
)]
pub async fn overtime(payload: web::Json<OvertimeRequest>) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let mut days = payload.days;

    let headers = match (payload.from, payload.to) {
        (Some(from), Some(to)) => {
            let range = DateRange::new(from, to);
            if range.total_days() > MAX_SHEET_DAYS {
                return Err(AppError::BadRequest(format!(
                    "Sheet period must not exceed {} days",
                    MAX_SHEET_DAYS
                ))
                .into());
            }
            fit_days(&mut days, range.total_days() as usize);
            day_headers(range).into_iter().map(str::to_string).collect()
        }
        _ => Vec::new(),
    };

    let hours = total_hours(&days);
    let amount = overtime_amount(parse_any_number(&payload.salary), hours);
    Ok(HttpResponse::Ok().json(OvertimeResponse {
        days,
        headers,
        total_hours: hours,
        amount,
    }))
}

/// Cash count sheet: native totals per currency, the riyal grand total at
/// fixed rates and the day's amount including ATM takings.
#[utoipa::path(
    post,
    path = "/api/v1/tools/cash",
    request_body = CashRequest,
    responses(
        (status = 200, description = "Totals per currency and in riyal", body = CashResponse),
        (status = 400, description = "Denomination the currency does not have", body = Object, example = json!({
            "message": "QAR has no 25 note"
        }))
    ),
    tag = "Tools"
)]
pub async fn cash(payload: web::Json<CashRequest>) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let none = HashMap::new();

    let mut currencies = Vec::new();
    for currency in Currency::iter() {
        let counts = payload.counts.get(&currency).unwrap_or(&none);
        let total = currency_total(currency, counts).map_err(|denomination| {
            AppError::BadRequest(format!("{} has no {} note", currency, denomination))
        })?;
        let total = finite(total)?;
        currencies.push(CurrencyTotal {
            currency,
            name: currency.arabic_name().to_string(),
            total: round_cents(total),
            rate: currency.rate_to_qar(),
            total_qar: round_cents(total * currency.rate_to_qar()),
        });
    }

    let grand_total_qar = finite(grand_total_qar(
        currencies.iter().map(|c| (c.currency, c.total)),
    ))?;
    let atm = typed_amount(&payload.atm)?;
    Ok(HttpResponse::Ok().json(CashResponse {
        currencies,
        grand_total_qar: round_cents(grand_total_qar),
        atm,
        total_daily_amount: round_cents(grand_total_qar + atm),
    }))
}

/// Daily closing sheet: tourist takings are the totals less the cargo desk.
#[utoipa::path(
    post,
    path = "/api/v1/tools/closing",
    request_body = ClosingRequest,
    responses(
        (status = 200, description = "Cargo and tourist split, grand total and car count", body = ClosingTotals)
    ),
    tag = "Tools"
)]
pub async fn closing(payload: web::Json<ClosingRequest>) -> actix_web::Result<impl Responder> {
    let sheet = ClosingSheet {
        cargo_atm: [typed_amount(&payload.cargo_atm_1)?, typed_amount(&payload.cargo_atm_2)?],
        cargo_cash: [typed_amount(&payload.cargo_cash_1)?, typed_amount(&payload.cargo_cash_2)?],
        total_atm: typed_amount(&payload.total_atm)?,
        total_cash: typed_amount(&payload.total_cash)?,
        cars_tourist: typed_amount(&payload.cars_tourist)?,
        cars_cargo: typed_amount(&payload.cars_cargo)?,
    };
    Ok(HttpResponse::Ok().json(closing_totals(&sheet)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cash::ClosingTotals;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;

    #[actix_web::test]
    async fn tafqit_accepts_arabic_indic_digits() {
        let app = test::init_service(
            App::new().route("/tafqit", web::post().to(tafqit)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/tafqit")
            .set_json(json!({"amount": "١٢٥٠"}))
            .to_request();
        let body: TafqitResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.amount, 1250);
        assert_eq!(body.words, "ألف ومائتان وخمسون ريال قطري لا غير");

        let req = test::TestRequest::post()
            .uri("/tafqit")
            .set_json(json!({"amount": "1000000000"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn overtime_fits_row_to_period() {
        let app = test::init_service(
            App::new().route("/overtime", web::post().to(overtime)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/overtime")
            .set_json(json!({
                "salary": "2400",
                "days": ["2", "٣"],
                "from": "2024-02-03",
                "to": "2024-02-05"
            }))
            .to_request();
        let body: OvertimeResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.days, vec!["2", "٣", "0"]);
        assert_eq!(body.headers, vec!["السبت", "الأحد", "الاثنين"]);
        assert_eq!(body.total_hours, 5.0);
        // 2400 / 30 / 8 = 10 per hour, x1.5 x5h
        assert_eq!(body.amount, 75);
    }

    #[actix_web::test]
    async fn overtime_rejects_a_period_longer_than_a_year() {
        let app = test::init_service(
            App::new().route("/overtime", web::post().to(overtime)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/overtime")
            .set_json(json!({
                "salary": "2400",
                "days": [],
                "from": "0001-01-01",
                "to": "9999-12-31"
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        // a leap year still fits on one sheet
        let req = test::TestRequest::post()
            .uri("/overtime")
            .set_json(json!({
                "salary": "2400",
                "days": [],
                "from": "2024-01-01",
                "to": "2024-12-31"
            }))
            .to_request();
        let body: OvertimeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.days.len(), 366);
    }

    #[actix_web::test]
    async fn cash_converts_every_currency_to_riyal() {
        let app = test::init_service(App::new().route("/cash", web::post().to(cash))).await;

        let req = test::TestRequest::post()
            .uri("/cash")
            .set_json(json!({
                "counts": {
                    "QAR": {"500": "2", "1": "3"},
                    "KWD": {"0.5": "4"}
                },
                "atm": "1,500"
            }))
            .to_request();
        let body: CashResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.currencies.len(), 6);
        assert_eq!(body.currencies[0].currency, Currency::Qar);
        assert_eq!(body.currencies[0].total, 1003.0);
        let kwd = body
            .currencies
            .iter()
            .find(|c| c.currency == Currency::Kwd)
            .unwrap();
        assert_eq!(kwd.total, 2.0);
        assert_eq!(kwd.total_qar, 21.0);
        assert_eq!(body.grand_total_qar, 1024.0);
        assert_eq!(body.atm, 1500.0);
        assert_eq!(body.total_daily_amount, 2524.0);
    }

    #[actix_web::test]
    async fn cash_rejects_a_denomination_the_currency_lacks() {
        let app = test::init_service(App::new().route("/cash", web::post().to(cash))).await;

        let req = test::TestRequest::post()
            .uri("/cash")
            .set_json(json!({"counts": {"QAR": {"25": "1"}}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "QAR has no 25 note");
    }

    #[actix_web::test]
    async fn closing_splits_cargo_from_tourists() {
        let app =
            test::init_service(App::new().route("/closing", web::post().to(closing))).await;

        let req = test::TestRequest::post()
            .uri("/closing")
            .set_json(json!({
                "cargo_atm_1": "1000",
                "cargo_atm_2": "250.5",
                "cargo_cash_1": "400",
                "total_atm": "5,000",
                "total_cash": "3,000",
                "cars_tourist": "12",
                "cars_cargo": "5"
            }))
            .to_request();
        let body: ClosingTotals = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.cargo_atm, 1250.5);
        assert_eq!(body.tourist_atm, 3749.5);
        assert_eq!(body.tourist_cash, 2600.0);
        assert_eq!(body.grand_total, 8000.0);
        assert_eq!(body.total_cars, 17.0);
    }
}
