/// A clocked unit that advances one bus cycle per call.
///
/// Returns `true` when the component has completed a full instruction/step
/// boundary (used by callers that want to count instructions rather than
/// raw cycles).
pub trait Component {
    fn tick(&mut self) -> bool;
}

/// A clocked unit that needs access to the shared bus to advance, and that
/// must identify itself as a particular `BusMaster` when doing so (CPUs,
/// DMA controllers).
pub trait BusMasterComponent {
    type Bus: ?Sized;

    fn tick_with_bus(&mut self, bus: &mut Self::Bus, master: super::BusMaster) -> bool;
}
