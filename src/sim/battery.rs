/// A shared resilience battery tracked by state of charge alone.
///
/// Capacity and charge are both kilowatt-hours. For any non-negative
/// capacity the state of charge stays within `[0, capacity]`: discharge
/// is capped by the remaining charge and recharge is capped by capacity.
/// A non-positive capacity is accepted and produces a battery that never
/// becomes dischargeable.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Usable capacity in kilowatt-hours.
    pub capacity_kwh: f64,

    /// Current state of charge in kilowatt-hours.
    pub soc_kwh: f64,
}

impl Battery {
    /// Creates a battery starting at full charge.
    pub fn full(capacity_kwh: f64) -> Self {
        Self {
            capacity_kwh,
            soc_kwh: capacity_kwh,
        }
    }

    /// Returns `true` while any charge remains.
    pub fn can_discharge(&self) -> bool {
        self.soc_kwh > 0.0
    }

    /// Draws up to `request_kwh` and returns the amount actually supplied,
    /// capped by the current state of charge.
    pub fn discharge(&mut self, request_kwh: f64) -> f64 {
        let supplied = request_kwh.min(self.soc_kwh);
        self.soc_kwh -= supplied;
        supplied
    }

    /// Adds `amount_kwh` of charge, capped at capacity.
    pub fn recharge(&mut self, amount_kwh: f64) {
        self.soc_kwh = self.capacity_kwh.min(self.soc_kwh + amount_kwh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_battery_starts_at_capacity() {
        let battery = Battery::full(5.0);
        assert_eq!(battery.capacity_kwh, 5.0);
        assert_eq!(battery.soc_kwh, 5.0);
        assert!(battery.can_discharge());
    }

    #[test]
    fn test_discharge_returns_requested_amount() {
        let mut battery = Battery::full(1.0);
        let supplied = battery.discharge(0.01);
        assert_eq!(supplied, 0.01);
        assert!((battery.soc_kwh - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_discharge_capped_by_remaining_charge() {
        let mut battery = Battery::full(1.0);
        battery.soc_kwh = 0.004;
        let supplied = battery.discharge(0.01);
        assert!((supplied - 0.004).abs() < 1e-12);
        assert_eq!(battery.soc_kwh, 0.0);
        assert!(!battery.can_discharge());
    }

    #[test]
    fn test_recharge_capped_at_capacity() {
        let mut battery = Battery::full(1.0);
        battery.recharge(0.005);
        assert_eq!(battery.soc_kwh, 1.0);

        battery.soc_kwh = 0.998;
        battery.recharge(0.005);
        assert_eq!(battery.soc_kwh, 1.0);
    }

    #[test]
    fn test_recharge_from_empty() {
        let mut battery = Battery::full(1.0);
        battery.soc_kwh = 0.0;
        battery.recharge(0.005);
        assert!((battery.soc_kwh - 0.005).abs() < 1e-12);
        assert!(battery.can_discharge());
    }

    #[test]
    fn test_zero_capacity_never_discharges() {
        let mut battery = Battery::full(0.0);
        assert!(!battery.can_discharge());
        battery.recharge(0.005);
        assert_eq!(battery.soc_kwh, 0.0);
    }

    #[test]
    fn test_negative_capacity_never_discharges() {
        let mut battery = Battery::full(-2.0);
        assert!(!battery.can_discharge());
        battery.recharge(0.005);
        assert_eq!(battery.soc_kwh, -2.0);
    }

    #[test]
    fn test_drain_and_refill_cycle() {
        let mut battery = Battery::full(0.02);
        assert_eq!(battery.discharge(0.01), 0.01);
        assert_eq!(battery.discharge(0.01), 0.01);
        assert!(!battery.can_discharge());

        for _ in 0..4 {
            battery.recharge(0.005);
        }
        assert!((battery.soc_kwh - 0.02).abs() < 1e-12);
    }
}
