use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    #[serde(rename = "hoursBack")]
    pub hours_back: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct KeyMetricsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "hoursBack")]
    pub hours_back: Option<u32>,
}
