use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::subscription::{Subscription, SubscriptionTier, SubscriptionType};
use crate::routes::ProfileQuery;
use crate::state::AppState;
use crate::tier::{
    is_feature_unlocked, max_links_for_tier, max_mazes_for_tier, AnalyticsWindow, Feature,
    PlanTier,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub profile_id: String,
    pub is_premium: bool,
    pub subscription: Subscription,
    pub plan_tier: PlanTier,
    pub max_links: usize,
    pub max_mazes: usize,
}

impl SubscriptionResponse {
    fn new(profile_id: String, subscription: Subscription) -> Self {
        let plan_tier = subscription.plan_tier();
        Self {
            profile_id,
            is_premium: subscription.is_premium(),
            subscription,
            plan_tier,
            max_links: max_links_for_tier(plan_tier),
            max_mazes: max_mazes_for_tier(plan_tier),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub profile_id: Option<String>,
    pub tier: SubscriptionTier,
    pub subscription_type: SubscriptionType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureStatus {
    pub feature: Feature,
    pub name: String,
    pub unlocked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsWindowStatus {
    pub window: AnalyticsWindow,
    pub days: u32,
    pub unlocked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesResponse {
    pub plan_tier: PlanTier,
    pub features: Vec<FeatureStatus>,
    pub analytics_windows: Vec<AnalyticsWindowStatus>,
}

/// GET /api/v1/subscription
pub async fn handle_get_subscription(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let profile_id = state.config.profile_or_demo(params.profile_id);
    let subscription = state.subscriptions.get(&profile_id).await?;
    Ok(Json(SubscriptionResponse::new(profile_id, subscription)))
}

/// PUT /api/v1/subscription
pub async fn handle_update_subscription(
    State(state): State<AppState>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let profile_id = state.config.profile_or_demo(req.profile_id);
    let subscription = state
        .subscriptions
        .update(
            &profile_id,
            Subscription {
                tier: req.tier,
                subscription_type: Some(req.subscription_type),
            },
        )
        .await?;
    Ok(Json(SubscriptionResponse::new(profile_id, subscription)))
}

/// GET /api/v1/features
/// The lookup table editors consult before letting a user change a gated setting.
pub async fn handle_features(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<FeaturesResponse>, AppError> {
    let profile_id = state.config.profile_or_demo(params.profile_id);
    let plan_tier = state.plan_tier(&profile_id).await?;

    let features = Feature::ALL
        .into_iter()
        .map(|feature| FeatureStatus {
            feature,
            name: feature.display_name().to_string(),
            unlocked: is_feature_unlocked(feature, plan_tier),
        })
        .collect();

    let analytics_windows = [
        AnalyticsWindow::SevenDays,
        AnalyticsWindow::ThirtyDays,
        AnalyticsWindow::NinetyDays,
        AnalyticsWindow::OneYear,
    ]
    .into_iter()
    .map(|window| AnalyticsWindowStatus {
        window,
        days: window.days(),
        unlocked: window.is_unlocked(plan_tier),
    })
    .collect();

    Ok(Json(FeaturesResponse {
        plan_tier,
        features,
        analytics_windows,
    }))
}
