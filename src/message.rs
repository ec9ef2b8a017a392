use serde::{Deserialize, Serialize};

/// Request half of the add-two-ints service.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddTwoIntsRequest {
    pub a: i64,
    pub b: i64,
}

impl AddTwoIntsRequest {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// The response a conforming service answers with.
    pub fn sum(&self) -> AddTwoIntsResponse {
        AddTwoIntsResponse {
            sum: self.a.wrapping_add(self.b),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddTwoIntsResponse {
    pub sum: i64,
}

/// One completed exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub request: AddTwoIntsRequest,
    pub response: AddTwoIntsResponse,
}
