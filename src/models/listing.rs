/// A travel offer surfaced by the assistant alongside a chat reply.
/// Prices are in Tunisian dinars.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub url: String,
    pub source: String,
}

impl Listing {
    pub fn price_label(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{} DT", self.price as i64)
        } else {
            format!("{:.1} DT", self.price)
        }
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    pub fn link_label(&self) -> String {
        format!("Voir l'annonce ({})", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, rating: f64) -> Listing {
        Listing {
            name: "Hôtel X".to_string(),
            price,
            rating,
            url: "http://example.com/offer".to_string(),
            source: "SiteA".to_string(),
        }
    }

    #[test]
    fn test_whole_price_renders_without_decimals() {
        assert_eq!(listing(150.0, 4.2).price_label(), "150 DT");
    }

    #[test]
    fn test_fractional_price_keeps_one_decimal() {
        assert_eq!(listing(89.5, 4.2).price_label(), "89.5 DT");
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(listing(150.0, 4.2).rating_label(), "4.2");
        assert_eq!(listing(150.0, 4.0).rating_label(), "4.0");
    }

    #[test]
    fn test_link_label_names_the_source() {
        assert_eq!(listing(150.0, 4.2).link_label(), "Voir l'annonce (SiteA)");
    }
}
