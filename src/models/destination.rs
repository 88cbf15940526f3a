use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

/// One record of the destination catalog. Served read-only by the
/// backend; the recommendation endpoint returns the same shape, ranked
/// per user and usually without the nested city.
#[derive(Debug, Clone, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avg_price_level: Option<i64>,
    #[serde(default)]
    pub popularity_score: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub city: Option<City>,
}

impl Destination {
    pub fn score_label(&self) -> String {
        match self.popularity_score {
            Some(score) => format!("Score : {score}"),
            None => "Score : -".to_string(),
        }
    }

    pub fn price_level_label(&self) -> String {
        match self.avg_price_level {
            Some(level) => format!("Prix : {level}"),
            None => "Prix : -".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_record_decodes() {
        let json = r#"{
            "id": 3,
            "title": "Sidi Bou Saïd",
            "description": "Village bleu et blanc",
            "avg_price_level": 2,
            "popularity_score": 4.5,
            "image_url": null,
            "city": {"id": 1, "name": "Tunis"}
        }"#;
        let dest: Destination = serde_json::from_str(json).unwrap();
        assert_eq!(dest.title, "Sidi Bou Saïd");
        assert_eq!(dest.city.as_ref().unwrap().name, "Tunis");
        assert_eq!(dest.score_label(), "Score : 4.5");
        assert_eq!(dest.price_level_label(), "Prix : 2");
    }

    #[test]
    fn test_sparse_record_falls_back_to_dashes() {
        let dest: Destination = serde_json::from_str(r#"{"id": 7, "title": "Douz"}"#).unwrap();
        assert!(dest.description.is_none());
        assert!(dest.city.is_none());
        assert_eq!(dest.score_label(), "Score : -");
        assert_eq!(dest.price_level_label(), "Prix : -");
    }
}
