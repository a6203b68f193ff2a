//! Reference unit table - 15 domains, ~140 units
//!
//! Order matters: domains and units are listed the way they are displayed.
//! Currency rates are static demo values, quoted as units per 1 USD.

use std::f64::consts::PI;
use crate::{ConversionKind, DomainSpec};

/// All reference domains, in display order
pub fn reference_table() -> Vec<DomainSpec> {
    vec![
        length(),
        weight(),
        volume(),
        area(),
        temperature(),
        time(),
        speed(),
        pressure(),
        energy(),
        power(),
        angle(),
        data(),
        currency(),
        fuel(),
        frequency(),
    ]
}

fn length() -> DomainSpec {
    // base: meter
    DomainSpec::new("length", "Length", ConversionKind::Linear)
        .unit("mm", "Millimeter (mm)", 0.001)
        .unit("cm", "Centimeter (cm)", 0.01)
        .unit("m", "Meter (m)", 1.0)
        .unit("km", "Kilometer (km)", 1000.0)
        .unit("in", "Inch (in)", 0.0254)
        .unit("ft", "Foot (ft)", 0.3048)
        .unit("yd", "Yard (yd)", 0.9144)
        .unit("mi", "Mile (mi)", 1609.344)
        .unit("nmi", "Nautical mile", 1852.0)
        .unit("um", "Micrometer (µm)", 1e-6)
        .unit("nm", "Nanometer (nm)", 1e-9)
}

fn weight() -> DomainSpec {
    // base: kilogram
    DomainSpec::new("weight", "Weight", ConversionKind::Linear)
        .unit("mg", "Milligram (mg)", 1e-6)
        .unit("g", "Gram (g)", 1e-3)
        .unit("kg", "Kilogram (kg)", 1.0)
        .unit("t", "Metric ton (t)", 1000.0)
        .unit("oz", "Ounce (oz)", 0.0283495231)
        .unit("lb", "Pound (lb)", 0.45359237)
        .unit("st", "Stone (UK)", 6.35029318)
        .unit("ston_us", "Short ton (US)", 907.18474)
        .unit("ston_uk", "Long ton (UK)", 1016.0469088)
        .unit("ct", "Carat (ct)", 0.0002)
        .unit("grain", "Grain", 0.0000647989)
}

fn volume() -> DomainSpec {
    // base: liter
    DomainSpec::new("volume", "Volume", ConversionKind::Linear)
        .unit("ml", "Milliliter (ml)", 0.001)
        .unit("l", "Liter (L)", 1.0)
        .unit("tsp", "Teaspoon", 0.00492892159)
        .unit("tbsp", "Tablespoon", 0.0147867648)
        .unit("cup", "Cup", 0.24)
        .unit("pt", "Pint", 0.473176473)
        .unit("qt", "Quart", 0.946352946)
        .unit("gal_us", "Gallon (US)", 3.785411784)
        .unit("gal_uk", "Gallon (UK)", 4.54609)
        .unit("cm3", "Cubic centimeter (cm³)", 0.001)
        .unit("m3", "Cubic meter (m³)", 1000.0)
        .unit("in3", "Cubic inch", 0.016387064)
        .unit("ft3", "Cubic foot", 28.3168466)
}

fn area() -> DomainSpec {
    // base: square meter
    DomainSpec::new("area", "Area", ConversionKind::Linear)
        .unit("mm2", "Square millimeter (mm²)", 1e-6)
        .unit("cm2", "Square centimeter (cm²)", 1e-4)
        .unit("m2", "Square meter (m²)", 1.0)
        .unit("km2", "Square kilometer (km²)", 1e6)
        .unit("in2", "Square inch", 0.00064516)
        .unit("ft2", "Square foot", 0.09290304)
        .unit("yd2", "Square yard", 0.83612736)
        .unit("acre", "Acre", 4046.8564224)
        .unit("ha", "Hectare", 10000.0)
}

fn temperature() -> DomainSpec {
    // base: Celsius; C = (v - offset) * factor
    DomainSpec::new("temperature", "Temperature", ConversionKind::Affine)
        .affine_unit("C", "Celsius (°C)", 1.0, 0.0)
        .affine_unit("F", "Fahrenheit (°F)", 5.0 / 9.0, 32.0)
        .affine_unit("K", "Kelvin (K)", 1.0, 273.15)
        .affine_unit("R", "Rankine (°R)", 5.0 / 9.0, 491.67)
}

fn time() -> DomainSpec {
    // base: second; months and years are Julian averages
    DomainSpec::new("time", "Time", ConversionKind::Linear)
        .unit("ms", "Millisecond", 1.0 / 1000.0)
        .unit("s", "Second", 1.0)
        .unit("min", "Minute", 60.0)
        .unit("h", "Hour", 3600.0)
        .unit("d", "Day", 86400.0)
        .unit("week", "Week", 604800.0)
        .unit("mo", "Month", 2629800.0)
        .unit("y", "Year", 31557600.0)
        .unit("decade", "Decade", 315576000.0)
        .unit("century", "Century", 3155760000.0)
}

fn speed() -> DomainSpec {
    // base: m/s
    DomainSpec::new("speed", "Speed", ConversionKind::Linear)
        .unit("m/s", "Meters per second (m/s)", 1.0)
        .unit("km/h", "Kilometers per hour (km/h)", 1.0 / 3.6)
        .unit("mph", "Miles per hour (mph)", 0.44704)
        .unit("knot", "Knot (nautical mile/hr)", 0.514444)
        .unit("ft/s", "Feet per second (ft/s)", 0.3048)
        .unit("mach", "Mach (speed of sound)", 340.29)
}

fn pressure() -> DomainSpec {
    // base: pascal
    DomainSpec::new("pressure", "Pressure", ConversionKind::Linear)
        .unit("Pa", "Pascal (Pa)", 1.0)
        .unit("kPa", "Kilopascal (kPa)", 1000.0)
        .unit("bar", "Bar", 100000.0)
        .unit("atm", "Atmosphere (atm)", 101325.0)
        .unit("psi", "Pound per square inch (psi)", 6894.757)
        .unit("torr", "Torr (mmHg)", 133.322)
        .unit("mmH2O", "mmH₂O", 9.80665)
        .unit("inHg", "inHg", 3386.39)
}

fn energy() -> DomainSpec {
    // base: joule
    DomainSpec::new("energy", "Energy", ConversionKind::Linear)
        .unit("J", "Joule (J)", 1.0)
        .unit("kJ", "Kilojoule (kJ)", 1000.0)
        .unit("cal", "Calorie (cal)", 4.184)
        .unit("kcal", "Kilocalorie (kcal)", 4184.0)
        .unit("Wh", "Watt-hour (Wh)", 3600.0)
        .unit("kWh", "Kilowatt-hour (kWh)", 3600000.0)
        .unit("BTU", "British thermal unit (BTU)", 1055.06)
        .unit("eV", "Electronvolt (eV)", 1.60218e-19)
}

fn power() -> DomainSpec {
    // base: watt
    DomainSpec::new("power", "Power", ConversionKind::Linear)
        .unit("W", "Watt (W)", 1.0)
        .unit("kW", "Kilowatt (kW)", 1000.0)
        .unit("MW", "Megawatt (MW)", 1e6)
        .unit("GW", "Gigawatt (GW)", 1e9)
        .unit("hp", "Horsepower (hp)", 745.7)
        .unit("BTU_hr", "BTU/hour", 0.29307107)
}

fn angle() -> DomainSpec {
    // base: degree
    DomainSpec::new("angle", "Angle", ConversionKind::Linear)
        .unit("deg", "Degree (°)", 1.0)
        .unit("rad", "Radian (rad)", 180.0 / PI)
        .unit("gon", "Gradian (gon)", 0.9)
        .unit("arcmin", "Minute of arc", 1.0 / 60.0)
        .unit("arcsec", "Second of arc", 1.0 / 3600.0)
}

fn data() -> DomainSpec {
    // base: bit; KB/MB/GB are binary multiples, as displayed
    DomainSpec::new("data", "Data", ConversionKind::Linear)
        .unit("bit", "Bit", 1.0)
        .unit("B", "Byte (B)", 8.0)
        .unit("KB", "Kilobyte (KB)", 8192.0)
        .unit("MB", "Megabyte (MB)", 8388608.0)
        .unit("GB", "Gigabyte (GB)", 8589934592.0)
        .unit("TB", "Terabyte (TB)", 8796093022208.0)
        .unit("PB", "Petabyte (PB)", 9007199254740992.0)
        .unit("KiB", "Kibibyte (KiB)", 8192.0)
        .unit("MiB", "Mebibyte (MiB)", 8388608.0)
        .unit("GiB", "Gibibyte (GiB)", 8589934592.0)
}

fn currency() -> DomainSpec {
    // base: USD; factor = units of currency per 1 USD
    DomainSpec::new("currency", "Currency", ConversionKind::InvertedLinear)
        .unit("USD", "USD", 1.0)
        .unit("EUR", "Euro (EUR)", 0.94)
        .unit("GBP", "Pound (GBP)", 0.82)
        .unit("PKR", "Pakistani Rupee (PKR)", 278.0)
        .unit("INR", "Indian Rupee (INR)", 83.0)
        .unit("JPY", "Japanese Yen (JPY)", 145.0)
        .unit("CNY", "Chinese Yuan (CNY)", 7.3)
}

fn fuel() -> DomainSpec {
    // base: L/100km; factor = base value at 1 unit
    DomainSpec::new("fuel", "Fuel economy", ConversionKind::Reciprocal)
        .unit("L_100km", "Liters/100km", 1.0)
        .unit("mpg_us", "Miles/gallon (US)", 235.215)
        .unit("mpg_uk", "Miles/gallon (UK)", 282.481)
        .unit("km_L", "Kilometers/liter", 100.0)
}

fn frequency() -> DomainSpec {
    // base: hertz
    DomainSpec::new("frequency", "Frequency", ConversionKind::Linear)
        .unit("Hz", "Hertz (Hz)", 1.0)
        .unit("kHz", "Kilohertz (kHz)", 1e3)
        .unit("MHz", "Megahertz (MHz)", 1e6)
        .unit("GHz", "Gigahertz (GHz)", 1e9)
        .unit("THz", "Terahertz (THz)", 1e12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let table = reference_table();
        assert_eq!(table.len(), 15);
        let largest = table.iter().map(|d| d.units.len()).max().unwrap();
        assert!(largest <= 16);
    }

    #[test]
    fn test_only_temperature_is_affine() {
        for spec in reference_table() {
            let has_offset = spec.units.iter().any(|u| u.offset != 0.0);
            assert_eq!(has_offset, spec.key == "temperature", "{}", spec.key);
        }
    }
}
