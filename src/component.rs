/// Threshold above which a bulb's current counts as "on".
const LIT_THRESHOLD: f64 = 1e-4;

/// Frame time used for the capacitor's dV/dt estimate.
const DELTA_TIME: f64 = 0.016;

#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Next quarter turn, wrapping 270 back to 0.
    pub fn rotated(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// A single piece on the board.
///
/// `Resistor` and `Capacitor` carry their value in SI base units (ohms,
/// farads). A source's supply voltage lives in [`Component::voltage`], fixed
/// at construction.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComponentKind {
    Wire,
    CornerWire,
    TeeWire,
    Resistor(f64),
    Capacitor(f64),
    Source,
    Destination,
    Bulb { lit: bool },
    Block,
}

/// Kind without payload, for toolbox buttons and placement-cap queries.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Wire,
    CornerWire,
    TeeWire,
    Resistor,
    Capacitor,
    Source,
    Destination,
    Bulb,
    Block,
}

impl ComponentKind {
    pub fn ty(&self) -> ComponentType {
        match self {
            ComponentKind::Wire => ComponentType::Wire,
            ComponentKind::CornerWire => ComponentType::CornerWire,
            ComponentKind::TeeWire => ComponentType::TeeWire,
            ComponentKind::Resistor(_) => ComponentType::Resistor,
            ComponentKind::Capacitor(_) => ComponentType::Capacitor,
            ComponentKind::Source => ComponentType::Source,
            ComponentKind::Destination => ComponentType::Destination,
            ComponentKind::Bulb { .. } => ComponentType::Bulb,
            ComponentKind::Block => ComponentType::Block,
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    rotation: Rotation,
    locked: bool,
    voltage: f64,
    current: f64,
    prev_voltage: f64,
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rotation: Rotation::default(),
            locked: false,
            voltage: 0.0,
            current: 0.0,
            prev_voltage: 0.0,
        }
    }

    /// Source with its supply voltage fixed at construction.
    pub fn source(name: impl Into<String>, supply_voltage: f64) -> Self {
        let mut c = Self::new(name, ComponentKind::Source);
        c.voltage = supply_voltage;
        c
    }

    pub fn bulb(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::Bulb { lit: false })
    }

    /// Builder: mark as a preset piece the player cannot remove.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Builder: start at a given rotation (presets use this).
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn ty(&self) -> ComponentType {
        self.kind.ty()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Everything rotates except obstacles.
    pub fn is_rotatable(&self) -> bool {
        !matches!(self.kind, ComponentKind::Block)
    }

    /// Advance rotation by a quarter turn, returning the new rotation.
    pub fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.rotated();
        self.rotation
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn set_voltage(&mut self, voltage: f64) {
        self.voltage = voltage;
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn set_current(&mut self, current: f64) {
        self.current = current;
    }

    pub fn resistance(&self) -> Option<f64> {
        match self.kind {
            ComponentKind::Resistor(ohms) => Some(ohms),
            _ => None,
        }
    }

    pub fn capacitance(&self) -> Option<f64> {
        match self.kind {
            ComponentKind::Capacitor(farads) => Some(farads),
            _ => None,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self.kind, ComponentKind::Bulb { lit: true })
    }

    pub fn set_lit(&mut self, on: bool) {
        if let ComponentKind::Bulb { lit } = &mut self.kind {
            *lit = on;
        }
    }

    /// Active conduction faces for the current kind and rotation.
    pub fn active_ports(&self) -> crate::ports::Ports {
        crate::ports::active_ports(self.kind, self.rotation)
    }

    /// Refresh derived electrical state from the component's voltage.
    pub fn recalculate_attributes(&mut self) {
        match self.kind {
            ComponentKind::Resistor(ohms) if ohms > 0.0 => {
                self.current = self.voltage / ohms;
            }
            ComponentKind::Capacitor(farads) => {
                let dv = self.voltage - self.prev_voltage;
                self.current = farads * dv / DELTA_TIME;
                self.prev_voltage = self.voltage;
            }
            ComponentKind::Bulb { .. } => {
                let on = self.current.abs() > LIT_THRESHOLD;
                self.set_lit(on);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps() {
        let mut c = Component::new("w", ComponentKind::Wire);
        assert_eq!(c.rotate(), Rotation::Deg90);
        assert_eq!(c.rotate(), Rotation::Deg180);
        assert_eq!(c.rotate(), Rotation::Deg270);
        assert_eq!(c.rotate(), Rotation::Deg0);
    }

    #[test]
    fn block_is_not_rotatable() {
        let block = Component::new("b", ComponentKind::Block);
        assert!(!block.is_rotatable());
        assert!(Component::new("w", ComponentKind::Wire).is_rotatable());
    }

    #[test]
    fn resistor_current_follows_ohms_law() {
        let mut r = Component::new("r", ComponentKind::Resistor(2.0));
        r.set_voltage(10.0);
        r.recalculate_attributes();
        assert_eq!(r.current(), 5.0);
    }

    #[test]
    fn zero_resistance_leaves_current_untouched() {
        let mut r = Component::new("r", ComponentKind::Resistor(0.0));
        r.set_voltage(10.0);
        r.recalculate_attributes();
        assert_eq!(r.current(), 0.0);
    }

    #[test]
    fn capacitor_current_follows_voltage_steps() {
        let mut c = Component::new("c", ComponentKind::Capacitor(1.0));
        // 1 F stepping 0 -> 0.016 V over one 0.016 s frame: I = C dV/dt = 1 A.
        c.set_voltage(0.016);
        c.recalculate_attributes();
        assert_eq!(c.current(), 1.0);

        // Voltage held steady: no charge flows.
        c.recalculate_attributes();
        assert_eq!(c.current(), 0.0);
    }

    #[test]
    fn bulb_lights_above_threshold() {
        let mut bulb = Component::bulb("bulb");
        bulb.set_current(0.5);
        bulb.recalculate_attributes();
        assert!(bulb.is_lit());

        bulb.set_current(0.0);
        bulb.recalculate_attributes();
        assert!(!bulb.is_lit());
    }

    #[test]
    fn source_keeps_supply_voltage() {
        let s = Component::source("src", 10.0).locked();
        assert_eq!(s.voltage(), 10.0);
        assert!(s.is_locked());
        assert_eq!(s.ty(), ComponentType::Source);
    }
}
