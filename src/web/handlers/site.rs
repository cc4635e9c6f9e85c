//! Microsite handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::datetime::today_in;
use crate::site::{Inquiry, MenuSection, INQUIRY_RECEIVED};
use crate::web::dto::{ApiResponse, InquiryResponse, SectionResponse, SectionSummary};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/sections - The menu.
pub async fn list_sections() -> Json<ApiResponse<Vec<SectionSummary>>> {
    let sections = MenuSection::ALL.into_iter().map(SectionSummary::from).collect();
    Json(ApiResponse::new(sections))
}

/// GET /api/sections/:slug - One section, as of today in the display timezone.
pub async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<SectionResponse>>, ApiError> {
    let section: MenuSection = slug.parse().map_err(ApiError::not_found)?;
    let today = today_in(state.controller.timezone());

    Ok(Json(ApiResponse::new(SectionResponse {
        slug: section.slug(),
        title: section.title(),
        content: section.content(&state.contest, today),
    })))
}

/// POST /api/inquiries - Contact form.
pub async fn submit_inquiry(
    Json(inquiry): Json<Inquiry>,
) -> Result<Json<ApiResponse<InquiryResponse>>, ApiError> {
    inquiry.validate()?;
    tracing::info!(
        name = %inquiry.name.trim(),
        email = %inquiry.email.trim(),
        topic = %inquiry.topic.trim(),
        "Inquiry received"
    );

    Ok(Json(ApiResponse::new(InquiryResponse {
        message: INQUIRY_RECEIVED,
    })))
}
