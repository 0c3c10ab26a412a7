use std::fmt;

use serde::{Deserialize, Serialize};

/// API usage counters for the integration, reported after connecting.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdInfo {
    pub external_request_threshold: u64,
    pub request_threshold_timeframe: u64,
    pub current_timeframe_request_count: u64,
}

impl fmt::Display for ThresholdInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API usage: {} of {} requests in the current {} minute window",
            self.current_timeframe_request_count,
            self.external_request_threshold,
            self.request_threshold_timeframe
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_usage_summary() {
        let raw = r#"{"externalRequestThreshold":10000,"requestThresholdTimeframe":60,"currentTimeframeRequestCount":12}"#;
        let info: ThresholdInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(
            info.to_string(),
            "API usage: 12 of 10000 requests in the current 60 minute window"
        );
    }
}
