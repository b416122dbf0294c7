// THEORY:
// The `conveyor` module gives the sorter its sense of objects moving through the
// machine. It owns every `ObjectToken` that is currently on the belt and is the only
// place that creates, moves or retires them.
//
// Key architectural principles:
// 1.  **Lifecycle Management**: The `ConveyorModel` is responsible for the entire
//     lifecycle of a token:
//     - **Birth**: `add_object` places a new token at distance 0 with a fresh id.
//     - **Transport**: every `update` advances all tokens by the belt speed.
//     - **Expiry**: a token whose distance reaches the travel limit falls off the end
//       of the belt and is dropped from the live set.
// 2.  **Stable Identity**: ids come from a per-conveyor counter, so two tokens of the
//     same model never share one.
// 3.  **No Capacity Limit**: nothing caps the live set. A spawner that adds tokens
//     faster than they expire will grow it without bound.

use crate::core_modules::color::ColorLabel;
use serde::{Deserialize, Serialize};

/// Belt geometry and speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConveyorConfig {
    /// Distance every token advances per `update`.
    pub belt_speed: f64,
    /// Distance at which a token leaves the belt.
    pub travel_limit: f64,
}

impl Default for ConveyorConfig {
    fn default() -> Self {
        Self {
            belt_speed: 0.5,
            travel_limit: 100.0,
        }
    }
}

/// One item riding the belt.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectToken {
    /// A unique and persistent ID for this token.
    pub id: u64,
    /// The color the object was spawned with.
    pub color: ColorLabel,
    /// Distance traveled since spawn. Starts at 0 and only ever grows.
    pub position: f64,
}

impl ObjectToken {
    fn new(id: u64, color: ColorLabel) -> Self {
        Self {
            id,
            color,
            position: 0.0,
        }
    }

    fn advance(&mut self, distance: f64) {
        self.position += distance;
    }
}

/// Manages the live set of `ObjectToken`s from one tick to the next.
#[derive(Debug, Clone)]
pub struct ConveyorModel {
    config: ConveyorConfig,
    /// The tokens currently on the belt, in insertion order.
    objects: Vec<ObjectToken>,
    /// A counter to ensure each new token gets a unique ID.
    next_id: u64,
    /// Total distance the belt surface has moved.
    belt_distance: f64,
}

impl Default for ConveyorModel {
    fn default() -> Self {
        Self::new(ConveyorConfig::default())
    }
}

impl ConveyorModel {
    pub fn new(config: ConveyorConfig) -> Self {
        Self {
            config,
            objects: Vec::new(),
            next_id: 0,
            belt_distance: 0.0,
        }
    }

    /// Places a new token of `color` at the start of the belt and returns its id.
    pub fn add_object(&mut self, color: ColorLabel) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(ObjectToken::new(id, color));
        tracing::debug!(id, %color, live = self.objects.len(), "object placed on conveyor");
        id
    }

    /// Advances the belt by one tick and returns the tokens still on it.
    pub fn update(&mut self) -> &[ObjectToken] {
        let speed = self.config.belt_speed;
        let limit = self.config.travel_limit;

        self.belt_distance += speed;
        for object in &mut self.objects {
            object.advance(speed);
        }

        let before = self.objects.len();
        self.objects.retain(|object| object.position < limit);
        let expired = before - self.objects.len();
        if expired > 0 {
            tracing::debug!(expired, live = self.objects.len(), "objects left the conveyor");
        }

        &self.objects
    }

    pub fn live_tokens(&self) -> &[ObjectToken] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn belt_distance(&self) -> f64 {
        self.belt_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_update_moves_a_new_token_half_a_unit() {
        let mut conveyor = ConveyorModel::default();
        let id = conveyor.add_object(ColorLabel::Green);

        let live = conveyor.update();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, id);
        assert_eq!(live[0].color, ColorLabel::Green);
        assert_eq!(live[0].position, 0.5);
    }

    #[test]
    fn token_expires_on_the_two_hundredth_update() {
        let mut conveyor = ConveyorModel::default();
        conveyor.add_object(ColorLabel::Red);

        for _ in 0..199 {
            assert_eq!(conveyor.update().len(), 1);
        }
        assert_eq!(conveyor.live_tokens()[0].position, 99.5);

        assert!(conveyor.update().is_empty());
        assert!(conveyor.is_empty());
    }

    #[test]
    fn ids_are_unique_and_order_is_preserved() {
        let mut conveyor = ConveyorModel::default();
        let first = conveyor.add_object(ColorLabel::Red);
        conveyor.update();
        let second = conveyor.add_object(ColorLabel::Blue);
        let third = conveyor.add_object(ColorLabel::Blue);

        assert_ne!(first, second);
        assert_ne!(second, third);

        let positions: Vec<(u64, f64)> = conveyor.update().iter().map(|o| (o.id, o.position)).collect();
        assert_eq!(positions, vec![(first, 1.0), (second, 0.5), (third, 0.5)]);
    }

    #[test]
    fn only_expired_tokens_are_dropped() {
        let mut conveyor = ConveyorModel::new(ConveyorConfig {
            belt_speed: 1.0,
            travel_limit: 3.0,
        });
        let old = conveyor.add_object(ColorLabel::Red);
        conveyor.update();
        conveyor.update();
        let young = conveyor.add_object(ColorLabel::Green);

        let live = conveyor.update();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, young);
        assert!(live.iter().all(|o| o.id != old));
    }

    #[test]
    fn belt_distance_accumulates_with_or_without_objects() {
        let mut conveyor = ConveyorModel::default();
        conveyor.update();
        conveyor.update();
        assert_eq!(conveyor.belt_distance(), 1.0);
    }
}
