mod common;

use matterlist::model::Matter;
use matterlist::ui::components::{Tile, TileEvent};

fn sample() -> Matter {
    let mut matter = common::matter("a001", "Acme v. Jones");
    matter.matter_number = Some("M-0001".to_string());
    matter.matter_type = Some("Consumer".to_string());
    matter.decision_date = chrono::NaiveDate::from_ymd_opt(2023, 5, 17);
    matter
}

#[test]
fn test_click_emits_selected_with_record_id() {
    let matter = sample();
    let tile = Tile::new(&matter, false);
    assert_eq!(
        tile.click(),
        TileEvent::Selected {
            item_id: "a001".to_string()
        }
    );
    assert_eq!(tile.matter().name, "Acme v. Jones");
}

#[test]
fn test_drag_payload_is_record_json() {
    let matter = sample();
    let event = Tile::new(&matter, true).drag_start().unwrap().unwrap();

    let TileEvent::DragStarted { payload } = event else {
        panic!("expected a drag event");
    };
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json["Id"], "a001");
    assert_eq!(json["Name"], "Acme v. Jones");
    assert_eq!(json["Matter_Number__c"], "M-0001");
    assert_eq!(json["Decision_Date__c"], "2023-05-17");
    assert!(json.get("Stage__c").is_none());

    let back: Matter = serde_json::from_str(&payload).unwrap();
    assert_eq!(back, matter);
}

#[test]
fn test_non_draggable_tile_has_no_payload() {
    let matter = sample();
    assert!(Tile::new(&matter, false).drag_start().is_none());
}
