//! Request-to-response pipeline: validate, resolve, normalize, build.

use std::sync::Arc;

use tracing::info;

use crate::error::PriceHistoryError;
use crate::normalize::normalize_series;
use crate::resolver::SymbolResolver;
use crate::response::{build_response, ApiResponse, ApiResult, PricePoint};
use crate::source::PriceSource;
use crate::validation::{validate_request, StockRequest};

/// Stateless service over an injected upstream source.
///
/// Cloning is cheap; clones share the source.
#[derive(Clone)]
pub struct PriceHistoryService {
    source: Arc<dyn PriceSource>,
    resolver: SymbolResolver,
}

impl PriceHistoryService {
    pub fn new(source: Arc<dyn PriceSource>, resolver: SymbolResolver) -> Self {
        Self { source, resolver }
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Runs the pipeline on an already-extracted request.
    pub async fn get_stock_data(&self, request: &StockRequest) -> ApiResult {
        self.price_series(request).await.into()
    }

    /// Parses a raw JSON body and runs the pipeline.
    pub async fn handle_json(&self, body: &[u8]) -> ApiResponse {
        let request = StockRequest::from_json(body);
        build_response(self.get_stock_data(&request).await)
    }

    async fn price_series(
        &self,
        request: &StockRequest,
    ) -> Result<Vec<PricePoint>, PriceHistoryError> {
        let query = validate_request(request)?;
        let resolution = self.resolver.resolve(self.source.as_ref(), &query).await?;
        let points = normalize_series(&resolution.history);
        info!(
            ticker = %query.ticker,
            symbol = %resolution.symbol,
            points = points.len(),
            "Returning price series"
        );
        Ok(points)
    }
}
