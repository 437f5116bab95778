//! Askama templates for the web frontend.

use askama::Template;

use super::dto::RouteResponse;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// Route results page.
#[derive(Template)]
#[template(path = "route.html")]
pub struct RouteTemplate {
    pub from: String,
    pub to: String,
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A routing result laid out as a list of steps.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub found: bool,
    pub steps: Vec<StepView>,
    pub walking_meters: u64,
}

/// One step of a route: a walk or a ride.
#[derive(Debug, Clone)]
pub enum StepView {
    Walk(WalkView),
    Ride(RideView),
}

/// Walking step view model.
#[derive(Debug, Clone)]
pub struct WalkView {
    pub from_name: String,
    pub to_name: String,
    pub meters: u64,
}

impl WalkView {
    /// Distance for display: meters below 1km, otherwise km to one decimal.
    pub fn distance_display(&self) -> String {
        if self.meters < 1000 {
            format!("{}m", self.meters)
        } else {
            format!("{:.1}km", self.meters as f64 / 1000.0)
        }
    }

    /// Whether the walk is too short to mention (a same-station change).
    pub fn is_negligible(&self) -> bool {
        self.meters == 0
    }
}

/// Ride step view model.
#[derive(Debug, Clone)]
pub struct RideView {
    pub number: usize,
    pub operator: String,
    pub zone: String,
    pub from_name: String,
    pub to_name: String,
    /// Stations passed through without stopping
    pub intermediate_stops: usize,
}

impl RouteView {
    /// Interleave walks and rides from a route response.
    pub fn from_response(response: &RouteResponse) -> Self {
        let mut steps = Vec::with_capacity(response.walks.len() + response.segments.len());
        let mut rides = response.segments.iter().enumerate();

        for walk in &response.walks {
            steps.push(StepView::Walk(WalkView {
                from_name: walk.from.name.clone(),
                to_name: walk.to.name.clone(),
                meters: walk.meters,
            }));
            if let Some((i, segment)) = rides.next() {
                steps.push(StepView::Ride(RideView {
                    number: i + 1,
                    operator: segment.operator.clone(),
                    zone: segment.zone.clone(),
                    from_name: segment.from.name.clone(),
                    to_name: segment.to.name.clone(),
                    intermediate_stops: segment.stations.saturating_sub(2),
                }));
            }
        }

        Self {
            found: response.found,
            steps,
            walking_meters: response.walking_meters,
        }
    }
}
