//! Flights and flight plans.

use std::fmt;

use serde::Serialize;

use super::Itinerary;

/// An itinerary flown at a fractional frequency in the LP relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxedFlight {
    /// The flown itinerary.
    pub itinerary: Itinerary,
    /// Frequency in the relaxation (strictly positive).
    pub frequency: f64,
}

impl RelaxedFlight {
    /// Cost contribution `tour_length × frequency`.
    pub fn cost(&self) -> f64 {
        self.itinerary.tour_length() * self.frequency
    }
}

/// An itinerary flown an integer number of times per period.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// The flown itinerary.
    pub itinerary: Itinerary,
    /// Number of times the itinerary is flown.
    pub frequency: u32,
}

impl Flight {
    /// Cost contribution `tour_length × frequency`.
    pub fn cost(&self) -> f64 {
        self.itinerary.tour_length() * f64::from(self.frequency)
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.3}", self.frequency, self.itinerary.tour_length())?;
        for (id, &w) in self.itinerary.allocation().iter().enumerate().skip(1) {
            if w > 0 {
                write!(f, " P{id}({w})")?;
            }
        }
        Ok(())
    }
}

/// Summary line of one flight, for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub frequency: u32,
    pub tour_length: f64,
    /// `(platform id, passengers)` pairs.
    pub passengers: Vec<(usize, u32)>,
}

/// An integer flight plan.
///
/// # Examples
///
/// ```
/// use u_flightplan::models::{Flight, FlightPlan, Itinerary};
///
/// let mut plan = FlightPlan::new();
/// plan.push(Flight {
///     itinerary: Itinerary::new(vec![1, 2], 33.0, vec![0, 2, 2]),
///     frequency: 1,
/// });
/// plan.push(Flight {
///     itinerary: Itinerary::new(vec![2], 30.0, vec![0, 0, 1]),
///     frequency: 1,
/// });
/// assert!((plan.objective() - 63.0).abs() < 1e-10);
/// assert_eq!(plan.served(3), vec![0, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPlan {
    flights: Vec<Flight>,
}

impl FlightPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a flight.
    pub fn push(&mut self, flight: Flight) {
        self.flights.push(flight);
    }

    /// The flights of this plan, in the order they were fixed.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of distinct flights.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns `true` if the plan has no flights.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Total flown distance `Σ tour_length × frequency`.
    pub fn objective(&self) -> f64 {
        self.flights.iter().map(Flight::cost).sum()
    }

    /// Passengers delivered per location id, for `num_locations` locations.
    pub fn served(&self, num_locations: usize) -> Vec<u32> {
        let mut served = vec![0; num_locations];
        for flight in &self.flights {
            for (id, &w) in flight.itinerary.allocation().iter().enumerate() {
                if id < num_locations {
                    served[id] += w * flight.frequency;
                }
            }
        }
        served
    }

    /// Relative excess over `lower_bound`, in percent.
    ///
    /// Returns `None` when the bound is not positive.
    pub fn gap_percent(&self, lower_bound: f64) -> Option<f64> {
        if lower_bound <= 0.0 {
            return None;
        }
        Some(100.0 * (self.objective() - lower_bound) / lower_bound)
    }

    /// Serializable per-flight summary.
    pub fn summary(&self) -> Vec<FlightSummary> {
        self.flights
            .iter()
            .map(|f| FlightSummary {
                frequency: f.frequency,
                tour_length: f.itinerary.tour_length(),
                passengers: f
                    .itinerary
                    .allocation()
                    .iter()
                    .enumerate()
                    .filter(|&(_, &w)| w > 0)
                    .map(|(id, &w)| (id, w))
                    .collect(),
            })
            .collect()
    }
}

impl fmt::Display for FlightPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution with z = {:.3}", self.objective())?;
        for flight in &self.flights {
            writeln!(f, "{flight}")?;
        }
        Ok(())
    }
}
