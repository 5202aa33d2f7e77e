//! The travel mode a road segment is usable in, as reported per-node by the DataFacade.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TravelMode {
    Inaccessible,
    Driving,
    Cycling,
    Walking,
    Ferry,
    Train,
    PushingBike,
    Steps,
}

impl TravelMode {
    /// §4.E.9: the suppress-mode handler fires for ferry and rail legs -- modes where announcing
    /// individual turns is meaningless because the vehicle has no steering choice.
    pub fn suppresses_turn_guidance(&self) -> bool {
        matches!(self, TravelMode::Ferry | TravelMode::Train)
    }
}
