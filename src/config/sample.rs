//! Reference vehicle used when no external car-control block is supplied.
//!
//! Utterances the layout is meant to support:
//!
//! - "turn on the driver fan", "set the fan speed to high", "set the fan to 7"
//! - "set the temperature to 72", "increase the temperature by 4"
//! - "open the driver window", "lower the driver window"
//! - "set the ambient light to blue", "set the AC mode to economy"
//! - "turn on the rear windshield defroster", "open the vent"
//! - "set the driver seat heater to medium", "turn on climate sync"

use crate::config::assets::{action, color, device, location, setting, unit, value};
use crate::config::builder::{BuildError, CarControlConfigBuilder};
use crate::config::model::CarControlConfig;

/// Build the reference vehicle configuration.
pub fn generate_car_control_config() -> Result<CarControlConfig, BuildError> {
    let mut builder = CarControlConfigBuilder::new();

    builder
        .create_zone("zone.all")
        .add_asset_id(location::ALL)
        .add_members([
            "all.fan",
            "all.heater",
            "ac",
            "vent",
            "ambient.light",
            "reading.light",
        ])
        .create_zone("zone.rear")
        .add_asset_id(location::REAR)
        .add_members(["rear.windshield"])
        .create_zone("zone.front")
        .add_asset_id(location::FRONT)
        .add_members(["front.light", "driver.seat", "passenger.seat"])
        .create_zone("zone.driver")
        .add_asset_id(location::DRIVER)
        .add_asset_id(location::LEFT)
        .add_members([
            "driver.fan",
            "driver.heater",
            "driver.seat",
            "driver.light",
            "driver.window",
        ])
        .create_zone("zone.passenger")
        .add_asset_id(location::PASSENGER)
        .add_asset_id(location::RIGHT)
        .add_members([
            "passenger.fan",
            "passenger.heater",
            "passenger.seat",
            "passenger.light",
        ])
        .create_zone("zone.secondRow")
        .add_asset_id(location::SECOND_ROW)
        .add_members(["secondRow.heater", "secondRow.light"])
        .set_default_zone("zone.all");

    for id in ["all.fan", "driver.fan", "passenger.fan"] {
        fan(&mut builder, id);
    }

    heater(&mut builder, "all.heater", Some(unit::FAHRENHEIT));
    heater(&mut builder, "driver.heater", None);
    heater(&mut builder, "passenger.heater", None);
    heater(&mut builder, "secondRow.heater", Some(unit::FAHRENHEIT));

    builder
        .create_endpoint("driver.window")
        .add_asset_id(device::WINDOW)
        .add_range_controller("height", false, 0.0, 100.0, 1.0)
        .add_asset_id(setting::HEIGHT);
    three_presets(&mut builder, 0.0, 50.0, 100.0);
    builder
        .add_action_set_range([action::OPEN], 0.0)
        .add_action_set_range([action::CLOSE], 100.0)
        .add_action_adjust_range([action::RAISE], 10.0)
        .add_action_adjust_range([action::LOWER], -10.0);

    for id in ["driver.light", "passenger.light", "front.light", "secondRow.light"] {
        builder
            .create_endpoint(id)
            .add_asset_id(device::LIGHT)
            .add_power_controller(false);
    }

    builder
        .create_endpoint("dome.light")
        .add_asset_id(device::DOME_LIGHT)
        .add_asset_id(device::CABIN_LIGHT)
        .add_power_controller(false)
        .create_endpoint("reading.light")
        .add_asset_id(device::READING_LIGHT)
        .add_power_controller(false)
        .create_endpoint("ambient.light")
        .add_asset_id(device::AMBIENT_LIGHT)
        .add_power_controller(false)
        .add_mode_controller("color", false, true)
        .add_asset_id(setting::COLOR)
        .add_asset_id(setting::MODE);
    for (mode, asset) in [
        ("RED", color::RED),
        ("BLUE", color::BLUE),
        ("GREEN", color::GREEN),
        ("WHITE", color::WHITE),
        ("ORANGE", color::ORANGE),
        ("YELLOW", color::YELLOW),
        ("INDIGO", color::INDIGO),
        ("VIOLET", color::VIOLET),
    ] {
        builder.add_value(mode).add_asset_id(asset);
    }

    builder
        .create_endpoint("ac")
        .add_asset_id(device::AIR_CONDITIONER)
        .add_power_controller(false)
        .add_mode_controller("mode", false, false)
        .add_asset_id(setting::MODE)
        .add_value("ECONOMY")
        .add_asset_id(setting::ECONOMY)
        .add_value("AUTO")
        .add_asset_id(setting::AUTO)
        .add_value("MANUAL")
        .add_asset_id(setting::MANUAL)
        .add_mode_controller("intensity", false, true)
        .add_asset_id(setting::INTENSITY)
        .add_value("LOW")
        .add_asset_id(value::LOW)
        .add_asset_id(value::MINIMUM)
        .add_value("MEDIUM")
        .add_asset_id(value::MEDIUM)
        .add_value("HIGH")
        .add_asset_id(value::HIGH)
        .add_asset_id(value::MAXIMUM)
        .add_action_adjust_mode([action::RAISE], 1)
        .add_action_adjust_mode([action::LOWER], -1);

    builder
        .create_endpoint("rear.windshield")
        .add_asset_id(device::WINDSHIELD)
        .add_asset_id(device::WINDOW)
        .add_toggle_controller("defroster", false)
        .add_asset_id(setting::DEFROST);

    builder
        .create_endpoint("vent")
        .add_asset_id(device::VENT)
        .add_power_controller(true)
        .add_mode_controller("position", false, true)
        .add_asset_id(setting::POSITION)
        .add_value("BODY")
        .add_asset_id(setting::BODY_VENTS)
        .add_value("FLOOR")
        .add_asset_id(setting::FLOOR_VENTS)
        .add_value("WINDSHIELD")
        .add_asset_id(setting::WINDSHIELD_VENTS)
        .add_value("MIX")
        .add_asset_id(setting::MIX_VENTS)
        .add_toggle_controller("height", false)
        .add_asset_id(setting::POSITION)
        .add_action_turn_on([action::OPEN, action::RAISE])
        .add_action_turn_off([action::CLOSE, action::LOWER]);

    for id in ["driver.seat", "passenger.seat"] {
        builder
            .create_endpoint(id)
            .add_asset_id(device::SEAT)
            .add_toggle_controller("heater", false)
            .add_asset_id(device::HEATER)
            .add_asset_id(setting::HEAT)
            .add_range_controller("heaterintensity", false, 1.0, 3.0, 1.0)
            .add_asset_id(device::HEATER)
            .add_asset_id(setting::HEAT);
        three_presets(&mut builder, 1.0, 2.0, 3.0);
    }

    builder
        .create_endpoint("car")
        .add_asset_id(device::CAR)
        .add_toggle_controller("recirculate", false)
        .add_asset_id(setting::AIR_RECIRCULATION)
        .add_toggle_controller("climate.sync", false)
        .add_asset_id(setting::CLIMATE_SYNC);

    builder.build()
}

fn fan(builder: &mut CarControlConfigBuilder, id: &str) {
    builder
        .create_endpoint(id)
        .add_asset_id(device::FAN)
        .add_power_controller(false)
        .add_range_controller("speed", false, 1.0, 10.0, 1.0)
        .add_asset_id(setting::FAN_SPEED);
    three_presets(builder, 1.0, 5.0, 10.0);
}

fn heater(builder: &mut CarControlConfigBuilder, id: &str, unit: Option<&str>) {
    builder
        .create_endpoint(id)
        .add_asset_id(device::HEATER)
        .add_asset_id(device::COOLER)
        .add_power_controller(false);
    let temperature = match unit {
        Some(unit) => {
            builder.add_range_controller_with_unit("temperature", false, 60.0, 90.0, 1.0, unit)
        }
        None => builder.add_range_controller("temperature", false, 60.0, 90.0, 1.0),
    };
    temperature
        .add_asset_id(setting::TEMPERATURE)
        .add_asset_id(setting::HEAT);
    three_presets(builder, 60.0, 75.0, 90.0);
}

/// Low/medium/high presets on the open range controller.
fn three_presets(builder: &mut CarControlConfigBuilder, low: f64, medium: f64, high: f64) {
    builder
        .add_preset(low)
        .add_asset_id(value::LOW)
        .add_asset_id(value::MINIMUM)
        .add_preset(medium)
        .add_asset_id(value::MEDIUM)
        .add_preset(high)
        .add_asset_id(value::HIGH)
        .add_asset_id(value::MAXIMUM);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::identity::{EndpointId, Interface, ZoneId};

    #[test]
    fn sample_builds_and_declares_every_zone_member() {
        let config = generate_car_control_config().unwrap();
        assert_eq!(config.zones.len(), 6);
        assert_eq!(config.default_zone_id, Some(ZoneId::from("zone.all")));
        assert_eq!(config.endpoints.len(), 21);
        for zone in &config.zones {
            for member in &zone.members {
                assert!(config.endpoint(&member.endpoint_id).is_some());
            }
        }
    }

    #[test]
    fn heaters_carry_unit_only_where_declared() {
        let config = generate_car_control_config().unwrap();
        let unit_of = |id: &str| {
            config
                .endpoint(&EndpointId::from(id))
                .and_then(|e| e.capabilities.iter().find(|c| c.interface == Interface::Range))
                .and_then(|c| c.configuration.as_ref())
                .and_then(|c| c.unit_of_measure.clone())
        };
        assert_eq!(unit_of("all.heater").as_deref(), Some(unit::FAHRENHEIT));
        assert_eq!(unit_of("driver.heater"), None);
    }

    #[test]
    fn vent_maps_open_and_close_to_toggle() {
        let config = generate_car_control_config().unwrap();
        let vent = config.endpoint(&EndpointId::from("vent")).unwrap();
        let toggle = vent
            .capabilities
            .iter()
            .find(|c| c.interface == Interface::Toggle)
            .unwrap();
        let mappings = &toggle.semantics.as_ref().unwrap().action_mappings;
        assert_eq!(mappings[0].directive.name, "TurnOn");
        assert_eq!(
            mappings[0].actions,
            vec![action::OPEN.to_string(), action::RAISE.to_string()]
        );
        assert_eq!(mappings[1].directive.name, "TurnOff");
    }
}
