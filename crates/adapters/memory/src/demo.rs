//! Demo data for local runs without a management API.

use serde_json::json;

use crate::InMemoryIotronic;

pub(crate) const GREENHOUSE: &str = "greenhouse";
pub(crate) const WAREHOUSE: &str = "warehouse";

pub(crate) fn seed(api: &InMemoryIotronic) {
    let Some(greenhouse) = api.insert_fleet(json!({
        "uuid": GREENHOUSE,
        "name": "Greenhouse",
        "description": "Soil and irrigation sensors, north wing",
        "created_at": "2024-03-02T08:15:00Z",
    })) else {
        return;
    };
    let Some(warehouse) = api.insert_fleet(json!({
        "id": WAREHOUSE,
        "name": "Warehouse",
    })) else {
        return;
    };

    api.inject_on_fleet(
        &greenhouse,
        json!({"plugin": {"uuid": "soil-monitor", "name": "Soil monitor"}, "status": "injected"}),
    );

    if let Some(sensor) = api.add_board(
        &greenhouse,
        json!({"uuid": "gh-sensor-01", "name": "Sensor 01", "status": "online", "type": "gateway", "agent": "wagent1"}),
    ) {
        api.inject_on_board(&sensor, json!({"plugin_uuid": "soil-monitor", "status": "running", "onboot": true}));
        api.inject_on_board(&sensor, json!({"plugin": "camera-stream", "status": "stopped"}));
    }

    if api
        .add_board(
            &greenhouse,
            json!({"uuid": "gh-valve-02", "name": "Valve 02", "status": "online"}),
        )
        .is_some()
    {
        api.set_live_board(json!({"uuid": "gh-valve-02", "name": "Valve 02", "status": "online", "alive": false}));
    }

    api.add_board(&greenhouse, json!({"board_uuid": "gh-gateway-03", "board_name": "Gateway 03"}));

    if let Some(door) = api.add_board(
        &warehouse,
        json!({"id": "wh-door-01", "name": "Door 01", "board_status": "Enabled"}),
    ) {
        api.inject_on_board(&door, json!({"plugin_id": 17, "plugin_name": "door-logger", "status": "running"}));
    }
}
