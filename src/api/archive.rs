use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::{SharedState, lock},
    error::AppError,
    model::document::{DocumentKind, SavedDocument},
    state::NewDocument,
};

#[derive(Deserialize, ToSchema)]
pub struct CreateDocument {
    #[serde(rename = "type")]
    #[schema(example = "PaymentVoucher")]
    pub doc_type: DocumentKind,
    #[schema(example = "Payment voucher 2024-02-01")]
    pub title: String,
    #[schema(example = "2024-02-01")]
    pub date: String,
    /// Form contents, stored as sent
    #[schema(value_type = Object)]
    pub data: Value,
    pub employee_name: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArchiveQuery {
    /// Title or employee name fragment, case-insensitive
    pub search: Option<String>,
    #[serde(rename = "type")]
    #[param(value_type = Option<String>, example = "MonthlyReport")]
    pub doc_type: Option<DocumentKind>,
}

#[utoipa::path(
    post,
    path = "/api/v1/archive",
    request_body = CreateDocument,
    responses(
        (status = 201, description = "Snapshot archived", body = SavedDocument)
    ),
    tag = "Archive"
)]
pub async fn save_document(
    state: SharedState,
    payload: web::Json<CreateDocument>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let doc = lock(&state)?.save_document(NewDocument {
        doc_type: payload.doc_type,
        title: payload.title,
        date: payload.date,
        data: payload.data,
        employee_name: payload.employee_name,
    });

    info!(document_id = %doc.id, doc_type = %doc.doc_type, "Document archived");
    Ok(HttpResponse::Created().json(doc))
}

#[utoipa::path(
    get,
    path = "/api/v1/archive",
    params(ArchiveQuery),
    responses(
        (status = 200, description = "Archived snapshots, newest first", body = [SavedDocument])
    ),
    tag = "Archive"
)]
pub async fn list_documents(
    state: SharedState,
    query: web::Query<ArchiveQuery>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let docs: Vec<&SavedDocument> = state
        .documents()
        .iter()
        .filter(|d| query.doc_type.is_none_or(|kind| d.doc_type == kind))
        .filter(|d| query.search.as_deref().is_none_or(|term| d.matches_search(term)))
        .collect();
    Ok(HttpResponse::Ok().json(docs))
}

#[utoipa::path(
    get,
    path = "/api/v1/archive/{id}",
    params(
        ("id" = String, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Archived snapshot", body = SavedDocument),
        (status = 404, description = "Document not found", body = Object, example = json!({
            "message": "Document not found"
        }))
    ),
    tag = "Archive"
)]
pub async fn get_document(
    state: SharedState,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let doc = state
        .find_document(&path)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;
    Ok(HttpResponse::Ok().json(doc))
}

#[utoipa::path(
    delete,
    path = "/api/v1/archive/{id}",
    params(
        ("id" = String, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Document deleted", body = Object, example = json!({
            "message": "Document deleted"
        })),
        (status = 404, description = "Document not found")
    ),
    tag = "Archive"
)]
pub async fn delete_document(
    state: SharedState,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    lock(&state)?.delete_document(&path)?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Document deleted"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::shared;
    use crate::state::tests::state_with;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn save_search_and_delete() {
        let state = shared(state_with(&[]));
        let app = crate::test_app!(state);

        let mut ids = Vec::new();
        for (kind, title, employee) in [
            ("CasualLeave", "Casual leave request", Some("Sarah Ahmed")),
            ("PaymentVoucher", "Payment voucher", None),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/v1/archive")
                .set_json(json!({
                    "type": kind,
                    "title": title,
                    "date": "2024-02-01",
                    "data": {"amount": "1250"},
                    "employee_name": employee
                }))
                .to_request();
            let doc: SavedDocument = test::call_and_read_body_json(&app, req).await;
            ids.push(doc.id);
        }

        let req = test::TestRequest::get().uri("/api/v1/archive").to_request();
        let docs: Vec<SavedDocument> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(docs[0].id, ids[1]);

        let req = test::TestRequest::get()
            .uri("/api/v1/archive?search=sarah")
            .to_request();
        let docs: Vec<SavedDocument> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].doc_type, DocumentKind::CasualLeave);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/archive/{}", ids[0]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/archive/{}", ids[0]))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
