// Offer post-processing: carrier codes -> human-readable carrier names

use crate::provider::{CarrierDictionary, RawOffer};
use serde::{Deserialize, Serialize};

// The offer as received, plus the resolved carrier label.
//
// The label is serialized under `carrierCode` for compatibility with existing consumers, so
// on the wire that key holds a display name, not a code. The machine-readable code is still
// in the untouched first segment and available through `carrier_code()`. `None` (null) when
// the offer has no itinerary or segment to read a code from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedOffer {
    #[serde(rename = "carrierCode")]
    pub carrier_label: Option<String>,
    #[serde(flatten)]
    pub offer: RawOffer,
}

impl EnrichedOffer {
    pub fn carrier_code(&self) -> Option<&str> {
        self.offer.first_carrier_code()
    }
}

// Pure, order-preserving, one output per input. Codes missing from the dictionary fall back to
// the code itself.
pub fn enrich(offers: Vec<RawOffer>, carriers: &CarrierDictionary) -> Vec<EnrichedOffer> {
    offers
        .into_iter()
        .map(|offer| enrich_offer(offer, carriers))
        .collect()
}

fn enrich_offer(mut offer: RawOffer, carriers: &CarrierDictionary) -> EnrichedOffer {
    let carrier_label = offer.first_carrier_code().map(|code| {
        carriers
            .name_for(code)
            .unwrap_or(code)
            .to_string()
    });

    // Overwritten, never duplicated
    offer.extra.remove("carrierCode");

    EnrichedOffer {
        carrier_label,
        offer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offer(id: &str, carrier: &str) -> RawOffer {
        serde_json::from_value(json!({
            "id": id,
            "itineraries": [{"segments": [{"carrierCode": carrier, "number": "100"}]}]
        }))
        .unwrap()
    }

    fn carriers() -> CarrierDictionary {
        [("AF", "Air France"), ("JL", "Japan Airlines")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_known_carrier_gets_display_name() {
        let enriched = enrich(vec![offer("1", "AF")], &carriers());
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].carrier_label.as_deref(), Some("Air France"));
        assert_eq!(enriched[0].carrier_code(), Some("AF"));
    }

    #[test]
    fn test_unknown_carrier_falls_back_to_code() {
        let enriched = enrich(vec![offer("1", "ZZ")], &carriers());
        assert_eq!(enriched[0].carrier_label.as_deref(), Some("ZZ"));

        let enriched = enrich(vec![offer("1", "AF")], &CarrierDictionary::new());
        assert_eq!(enriched[0].carrier_label.as_deref(), Some("AF"));
    }

    #[test]
    fn test_order_is_preserved() {
        let offers = vec![offer("1", "JL"), offer("2", "AF"), offer("3", "ZZ")];
        let enriched = enrich(offers, &carriers());

        let ids: Vec<_> = enriched
            .iter()
            .map(|o| o.offer.extra["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let labels: Vec<_> = enriched
            .iter()
            .map(|o| o.carrier_label.as_deref().unwrap())
            .collect();
        assert_eq!(labels, vec!["Japan Airlines", "Air France", "ZZ"]);
    }

    #[test]
    fn test_offer_without_segments_gets_null_label() {
        let bare: RawOffer = serde_json::from_value(json!({"id": "1"})).unwrap();
        let empty: RawOffer =
            serde_json::from_value(json!({"id": "2", "itineraries": [{"segments": []}]})).unwrap();

        let enriched = enrich(vec![bare, empty], &carriers());
        assert_eq!(enriched.len(), 2);
        assert!(enriched.iter().all(|o| o.carrier_label.is_none()));

        let serialized = serde_json::to_value(&enriched[0]).unwrap();
        assert_eq!(serialized["carrierCode"], serde_json::Value::Null);
    }

    #[test]
    fn test_serialized_offer_overwrites_top_level_carrier_code() {
        let mut raw = offer("1", "AF");
        raw.extra
            .insert("carrierCode".to_string(), json!("stale"));

        let enriched = enrich(vec![raw], &carriers());
        let serialized = serde_json::to_value(&enriched[0]).unwrap();

        assert_eq!(serialized["carrierCode"], "Air France");
        assert_eq!(serialized["id"], "1");
        assert_eq!(
            serialized["itineraries"][0]["segments"][0]["carrierCode"],
            "AF"
        );
    }
}
