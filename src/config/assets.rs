//! Asset ids and semantic actions understood by the car-control engine.
//!
//! These are localization tags, not display strings; the engine maps each one
//! to the friendly names a user may say.

pub mod location {
    pub const ALL: &str = "Alexa.Location.All";
    pub const DRIVER: &str = "Alexa.Location.Driver";
    pub const PASSENGER: &str = "Alexa.Location.Passenger";
    pub const FRONT: &str = "Alexa.Location.Front";
    pub const REAR: &str = "Alexa.Location.Rear";
    pub const LEFT: &str = "Alexa.Location.Left";
    pub const RIGHT: &str = "Alexa.Location.Right";
    pub const SECOND_ROW: &str = "Alexa.Location.SecondRow";
    pub const THIRD_ROW: &str = "Alexa.Location.ThirdRow";
}

pub mod device {
    pub const AIR_CONDITIONER: &str = "Alexa.Device.AirConditioner";
    pub const AMBIENT_LIGHT: &str = "Alexa.Device.AmbientLight";
    pub const CABIN_LIGHT: &str = "Alexa.Device.CabinLight";
    pub const CAR: &str = "Alexa.Device.Car";
    pub const COOLER: &str = "Alexa.Device.Cooler";
    pub const DOME_LIGHT: &str = "Alexa.Device.DomeLight";
    pub const FAN: &str = "Alexa.Device.Fan";
    pub const HEATER: &str = "Alexa.Device.Heater";
    pub const LIGHT: &str = "Alexa.Device.Light";
    pub const READING_LIGHT: &str = "Alexa.Device.ReadingLight";
    pub const SEAT: &str = "Alexa.Device.Seat";
    pub const VENT: &str = "Alexa.Device.Vent";
    pub const WINDOW: &str = "Alexa.Device.Window";
    pub const WINDSHIELD: &str = "Alexa.Device.Windshield";
}

pub mod setting {
    pub const AIR_RECIRCULATION: &str = "Alexa.Setting.AirRecirculation";
    pub const AUTO: &str = "Alexa.Setting.Auto";
    pub const BODY_VENTS: &str = "Alexa.Setting.BodyVents";
    pub const CLIMATE_SYNC: &str = "Alexa.Setting.ClimateSync";
    pub const COLOR: &str = "Alexa.Setting.Color";
    pub const DEFROST: &str = "Alexa.Setting.Defrost";
    pub const ECONOMY: &str = "Alexa.Setting.Economy";
    pub const FAN_SPEED: &str = "Alexa.Setting.FanSpeed";
    pub const FLOOR_VENTS: &str = "Alexa.Setting.FloorVents";
    pub const HEAT: &str = "Alexa.Setting.Heat";
    pub const HEIGHT: &str = "Alexa.Setting.Height";
    pub const INTENSITY: &str = "Alexa.Setting.Intensity";
    pub const MANUAL: &str = "Alexa.Setting.Manual";
    pub const MIX_VENTS: &str = "Alexa.Setting.MixVents";
    pub const MODE: &str = "Alexa.Setting.Mode";
    pub const POSITION: &str = "Alexa.Setting.Position";
    pub const TEMPERATURE: &str = "Alexa.Setting.Temperature";
    pub const WINDSHIELD_VENTS: &str = "Alexa.Setting.WindshieldVents";
}

pub mod value {
    pub const LOW: &str = "Alexa.Value.Low";
    pub const MINIMUM: &str = "Alexa.Value.Minimum";
    pub const MEDIUM: &str = "Alexa.Value.Medium";
    pub const HIGH: &str = "Alexa.Value.High";
    pub const MAXIMUM: &str = "Alexa.Value.Maximum";
}

pub mod color {
    pub const RED: &str = "Alexa.Color.Red";
    pub const BLUE: &str = "Alexa.Color.Blue";
    pub const GREEN: &str = "Alexa.Color.Green";
    pub const WHITE: &str = "Alexa.Color.White";
    pub const ORANGE: &str = "Alexa.Color.Orange";
    pub const YELLOW: &str = "Alexa.Color.Yellow";
    pub const INDIGO: &str = "Alexa.Color.Indigo";
    pub const VIOLET: &str = "Alexa.Color.Violet";
}

pub mod unit {
    pub const FAHRENHEIT: &str = "Alexa.Unit.Temperature.Fahrenheit";
    pub const CELSIUS: &str = "Alexa.Unit.Temperature.Celsius";
    pub const PERCENT: &str = "Alexa.Unit.Percent";
}

/// Semantic actions usable in action mappings.
pub mod action {
    pub const OPEN: &str = "Alexa.Actions.Open";
    pub const CLOSE: &str = "Alexa.Actions.Close";
    pub const RAISE: &str = "Alexa.Actions.Raise";
    pub const LOWER: &str = "Alexa.Actions.Lower";
}
