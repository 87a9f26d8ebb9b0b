//! Headless zombie: chases the boy while it holds at least as many balls,
//! runs away otherwise, and wanders when the boy is out of sight.
//!
//! The boy walks a straight line and picks up a ball every 40 frames.

use agent_bt::{ActionType, Behavior, BehaviorTree, Status};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PIXEL_PER_METER: f64 = 10.0 / 0.3;
const RUN_SPEED_PPS: f64 = 10.0 * 1000.0 / 3600.0 * PIXEL_PER_METER;
const SIGHT_RANGE: f64 = 7.0 * PIXEL_PER_METER;
const FRAME_TIME: f64 = 1.0 / 30.0;
const FRAMES: u32 = 240;

#[derive(Debug, Default)]
struct Scene {
    zombie: (f64, f64),
    zombie_balls: u32,
    boy: (f64, f64),
    boy_balls: u32,
    activity: &'static str,
    frame_time: f64,
}

impl Scene {
    fn boy_in_range(&self) -> bool {
        let (dx, dy) = (self.boy.0 - self.zombie.0, self.boy.1 - self.zombie.1);
        dx * dx + dy * dy < SIGHT_RANGE * SIGHT_RANGE
    }

    fn move_along(&mut self, angle: f64, scale: f64) {
        let distance = RUN_SPEED_PPS * self.frame_time * scale;
        self.zombie.0 += distance * angle.cos();
        self.zombie.1 += distance * angle.sin();
    }

    fn angle_to_boy(&self) -> f64 {
        (self.boy.1 - self.zombie.1).atan2(self.boy.0 - self.zombie.0)
    }
}

fn main() {
    let _ignore = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .with(tracing_forest::ForestLayer::default())
        .try_init();

    let in_range = || ActionType::predicate("boy within 7m", Scene::boy_in_range);

    let chase = Behavior::sequence(
        "chase",
        vec![
            Behavior::Action(in_range()),
            Behavior::Action(ActionType::predicate("zombie balls >= boy balls", |s: &Scene| {
                s.zombie_balls >= s.boy_balls
            })),
            Behavior::Action(ActionType::action("chase boy", |s: &mut Scene| {
                if !s.boy_in_range() || s.zombie_balls < s.boy_balls {
                    return Status::Failure;
                }
                s.activity = "chase";
                s.move_along(s.angle_to_boy(), 1.0);
                Status::Running
            })),
        ],
    );

    let flee = Behavior::sequence(
        "flee",
        vec![
            Behavior::Action(in_range()),
            Behavior::Action(ActionType::predicate("zombie balls < boy balls", |s: &Scene| {
                s.zombie_balls < s.boy_balls
            })),
            Behavior::Action(ActionType::action("run away", |s: &mut Scene| {
                if !s.boy_in_range() {
                    return Status::Success;
                }
                s.activity = "flee";
                s.move_along(s.angle_to_boy() + std::f64::consts::PI, 1.0);
                Status::Running
            })),
        ],
    );

    let mut heading = 0.0;
    let wander = Behavior::Action(ActionType::action("wander", move |s: &mut Scene| {
        s.activity = "wander";
        heading += 0.15;
        s.move_along(heading, 0.5);
        Status::Success
    }));

    let scene = Scene {
        zombie: (0.0, 0.0),
        zombie_balls: 2,
        boy: (400.0, 0.0),
        frame_time: FRAME_TIME,
        ..Default::default()
    };

    let mut tree = match BehaviorTree::builder(scene)
        .root(Behavior::select("zombie", vec![chase, flee, wander]))
        .build()
    {
        Ok(tree) => tree,
        Err(error) => {
            tracing::error!(%error, "invalid tree");
            return;
        }
    };

    let mut last_activity = "";
    for frame in 0..FRAMES {
        let scene = tree.shared_mut();
        scene.boy.0 -= 40.0 * FRAME_TIME;
        if frame % 40 == 39 {
            scene.boy_balls += 1;
        }

        tree.run();

        let scene = tree.shared();
        if scene.activity != last_activity {
            println!(
                "frame {frame:>3}: {:<6} zombie=({:>7.1}, {:>6.1}) boy=({:>6.1}, {:>4.1}) balls {}:{}",
                scene.activity,
                scene.zombie.0,
                scene.zombie.1,
                scene.boy.0,
                scene.boy.1,
                scene.zombie_balls,
                scene.boy_balls,
            );
            last_activity = scene.activity;
        }
    }

    println!("final state: {:#?}", tree.state().snapshot());
}
