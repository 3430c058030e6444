use crate::dtos::metrics::MetricsData;

/// One endpoint's slice of the traffic, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointShare {
    pub endpoint: String,
    pub count: u64,
    pub percentage: f64,
}

/// Per-endpoint percentages, sorted by traffic. An empty window
/// (`total_requests == 0`) yields an empty breakdown instead of dividing
/// by zero.
pub fn endpoint_breakdown(metrics: &MetricsData) -> Vec<EndpointShare> {
    if metrics.total_requests == 0 {
        return Vec::new();
    }
    let total = metrics.total_requests as f64;
    let mut shares: Vec<EndpointShare> = metrics
        .requests_by_endpoint
        .iter()
        .map(|(endpoint, count)| EndpointShare {
            endpoint: endpoint.clone(),
            count: *count,
            percentage: (*count as f64 / total) * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.endpoint.cmp(&b.endpoint)));
    shares
}

/// Success rate for display; "no data" when the window saw no requests.
pub fn success_rate_display(metrics: &MetricsData) -> String {
    if metrics.total_requests == 0 {
        "no data".to_string()
    } else {
        format!("{:.1}%", metrics.success_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn metrics(total: u64, by_endpoint: &[(&str, u64)]) -> MetricsData {
        MetricsData {
            total_requests: total,
            successful_requests: total,
            failed_requests: 0,
            average_response_time: 12.5,
            success_rate: 100.0,
            requests_by_endpoint: by_endpoint
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn empty_window_never_divides_by_zero() {
        let empty = metrics(0, &[("/bans", 0)]);
        assert!(endpoint_breakdown(&empty).is_empty());
        assert_eq!(success_rate_display(&empty), "no data");
    }

    #[test]
    fn percentages_are_finite_and_ordered_by_traffic() {
        let data = metrics(200, &[("/bans", 50), ("/message/info", 150)]);
        let shares = endpoint_breakdown(&data);

        assert_eq!(shares[0].endpoint, "/message/info");
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].endpoint, "/bans");
        assert_eq!(shares[1].percentage, 25.0);
        assert!(shares.iter().all(|s| s.percentage.is_finite()));
    }

    #[test]
    fn success_rate_is_formatted_with_one_decimal() {
        let mut data = metrics(10, &[("/bans", 10)]);
        data.success_rate = 99.456;
        assert_eq!(success_rate_display(&data), "99.5%");
    }
}
