//! Platform type.

/// An offshore platform (or the depot) with a crew-exchange demand.
///
/// Platform 0 is conventionally the depot: it sits at the origin and has no
/// demand. Platforms 1..=N carry the number of passengers that must be flown
/// in per planning period.
///
/// # Examples
///
/// ```
/// use u_flightplan::models::Platform;
///
/// let depot = Platform::depot();
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let p = Platform::new(1, 30.0, 40.0, 6);
/// assert_eq!(p.id(), 1);
/// assert_eq!(p.demand(), 6);
/// assert!((p.distance_to(&depot) - 50.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    id: usize,
    x: f64,
    y: f64,
    demand: u32,
}

impl Platform {
    /// Creates a new platform.
    pub fn new(id: usize, x: f64, y: f64, demand: u32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates the depot (id=0, at the origin, demand=0).
    pub fn depot() -> Self {
        Self::new(0, 0.0, 0.0, 0)
    }

    /// Returns a copy of this platform with a different demand.
    pub fn with_demand(mut self, demand: u32) -> Self {
        self.demand = demand;
        self
    }

    /// Platform ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Crew-exchange demand (passengers per period).
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Euclidean distance to another platform.
    pub fn distance_to(&self, other: &Platform) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
