// server/src/web/handlers/history_handlers.rs

use actix_web::{web, HttpResponse};
use footprint_core::history::DEFAULT_PAGE_SIZE;
use footprint_core::{summarize, HistoryQuery, StatusFilter};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::Result;
use crate::state::AppState;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryParams {
  pub status: Option<String>,
  pub page: Option<usize>,
  pub page_size: Option<usize>,
}

impl OrderHistoryParams {
  fn into_query(self) -> Result<HistoryQuery> {
    let status = match self.status.as_deref() {
      Some(raw) => raw.parse::<StatusFilter>()?,
      None => StatusFilter::All,
    };
    Ok(HistoryQuery {
      status,
      page: self.page.unwrap_or(1),
      page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    })
  }
}

/// `GET /api/users/{user_id}/orders/history?status=&page=&pageSize=`
#[instrument(name = "handler::order_history", skip(app_state, path, params), fields(user_id = %path))]
pub async fn order_history_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  params: web::Query<OrderHistoryParams>,
) -> Result<HttpResponse> {
  let user_id = path.into_inner();
  let query = params.into_inner().into_query()?;

  let orders = app_state.orders.list_for_user(user_id).await?;
  let history = summarize(orders, &query);
  info!(
    total_orders = history.total_orders,
    page = history.current_page,
    "Order history assembled."
  );

  Ok(HttpResponse::Ok().json(history))
}
