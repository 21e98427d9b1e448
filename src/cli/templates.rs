use serde_json::{json, Value};

/// Prebuilt canvas data payloads, carried over from the original HUD
/// client. Each template is the `data` object of a save request; the
/// template name doubles as the canvas name.
pub const TEMPLATE_NAMES: &[&str] = &[
    "Force_HUD",
    "Financial_Summary",
    "Corp_Tiers",
    "Black_Ops_Funding",
    "Mission_Log",
    "Force_Visions",
];

pub fn template(name: &str) -> Option<Value> {
    let data = match name {
        "Force_HUD" => json!({
            "alignment": "Gray",
            "force_score": 58,
            "active_powers": ["Force Push", "Mind Trick"],
            "moral_trajectory": ["used Force on a civilian", "resisted dark influence"],
        }),
        "Financial_Summary" => json!({
            "total_credits": 4820000,
            "black_fund": 940000,
            "controlled_shells": 6,
            "last_movement": "Encrypted transfer to Hutt escrow",
            "notes": ["injected capital into CorSec", "bribed customs officials"],
        }),
        "Corp_Tiers" => json!({
            "current_rank": "Syndicate Broker",
            "board_seat": false,
            "next_milestone": "Acquire 5% stake in InterGalFed",
            "rivals": ["Luthan Hross", "Kesso Majar"],
        }),
        "Black_Ops_Funding" => json!({
            "current_balance": 420000,
            "projects": ["Silent claw", "Droid reprogramming uplink"],
            "last_injection": "from MandalTech bid skimming",
        }),
        "Mission_Log" => json!({
            "last_ops": [
                "Raided Zann Consortium spice node",
                "Intercepted Mandalorian scout pod",
            ],
            "failed_ops": ["Bribe Imperial governor"],
            "next_target": "Zeltros central exchange",
        }),
        "Force_Visions" => json!({
            "vision_type": "Fragmented",
            "content": "A cloaked figure places a kyber shard on a Sith altar.",
            "interpretation": "Dark path intersects with redemption",
            "urgency": "High",
        }),
        _ => return None,
    };
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_template_resolves() {
        for name in TEMPLATE_NAMES {
            assert!(template(name).is_some(), "missing template {name}");
        }
        assert!(template("No_Such_HUD").is_none());
    }

    #[test]
    fn force_hud_carries_an_alignment() {
        let data = template("Force_HUD").unwrap();
        assert_eq!(data["alignment"], "Gray");
    }
}
