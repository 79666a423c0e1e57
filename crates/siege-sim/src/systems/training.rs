//! Training queue: timed FIFO production of player units.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;

use siege_core::config::SimConfig;
use siege_core::enums::{Team, UnitKind};
use siege_core::events::SimEvent;
use siege_core::state::TrainingView;

use crate::world_setup::spawn_unit;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOrder {
    pub kind: UnitKind,
    pub spawn_point: Vec2,
    pub remaining: f32,
    pub total: f32,
}

#[derive(Debug, Clone, Default)]
pub struct TrainingQueue {
    orders: VecDeque<TrainingOrder>,
}

impl TrainingQueue {
    pub fn push(&mut self, kind: UnitKind, training_time: f32, spawn_point: Vec2) {
        self.orders.push_back(TrainingOrder {
            kind,
            spawn_point,
            remaining: training_time,
            total: training_time,
        });
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Count the head order down. Returns the order when it completes.
    pub fn advance(&mut self, dt: f32) -> Option<TrainingOrder> {
        let head = self.orders.front_mut()?;
        head.remaining -= dt;
        if head.remaining > 0.0 {
            return None;
        }
        self.orders.pop_front()
    }

    pub fn views(&self) -> Vec<TrainingView> {
        self.orders
            .iter()
            .enumerate()
            .map(|(i, order)| TrainingView {
                kind: order.kind,
                progress: if i == 0 && order.total > 0.0 {
                    (1.0 - order.remaining / order.total).clamp(0.0, 1.0)
                } else {
                    0.0
                },
            })
            .collect()
    }
}

pub fn run(
    world: &mut World,
    queue: &mut TrainingQueue,
    config: &SimConfig,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    let Some(TrainingOrder {
        kind, spawn_point, ..
    }) = queue.advance(dt)
    else {
        return;
    };
    let entity = spawn_unit(world, config, kind, Team::Player, spawn_point);
    events.push(SimEvent::UnitTrained {
        unit: entity.to_bits().get(),
        kind,
    });
    tracing::info!(?kind, queued = queue.len(), "unit trained");
}
