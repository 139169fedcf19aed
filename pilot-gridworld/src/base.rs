//! Grid world simulator.
use super::{GridMove, GridWorldConfig};
use anyhow::{bail, Result};
use log::{debug, info};
use ndarray::{ArrayD, IxDyn};
use pilot_core::{
    Key, KeyBindings, NativeActionSet, NativeCommand, Observation, RunPhase, Simulator,
};
use strum::IntoEnumIterator;

const AGENT_VALUE: f32 = 255.0;
const GOAL_VALUE: f32 = 128.0;
const BACKGROUND_RGB: [f32; 3] = [32.0, 32.0, 32.0];
const GOAL_RGB: [f32; 3] = [0.0, 200.0, 0.0];
const AGENT_RGB: [f32; 3] = [230.0, 60.0, 60.0];

/// A grid world.
///
/// Episodes of the train phase start at a random cell. Episodes of the test
/// phase start at the top-left cell, so evaluations are comparable.
///
/// The observation is a `[height, width]` image where the agent is `255`, the
/// goal is `128` and other cells are `0`. The measurements are `[x, y, steps]`.
pub struct GridWorld {
    config: GridWorldConfig,
    goal: (usize, usize),
    pos: (usize, usize),
    steps: usize,
    rng: fastrand::Rng,
}

impl GridWorld {
    /// Builds the simulator.
    pub fn build(config: &GridWorldConfig, seed: u64) -> Result<Self> {
        if config.width * config.height < 2 {
            bail!(
                "grid of {}x{} has no room for a start and a goal",
                config.width,
                config.height
            );
        }
        let goal = config.goal_cell();
        if goal.0 >= config.width || goal.1 >= config.height {
            bail!(
                "goal {:?} is outside of the {}x{} grid",
                goal,
                config.width,
                config.height
            );
        }
        if config.max_steps == 0 || config.cell_size == 0 {
            bail!("max_steps and cell_size must be positive");
        }

        info!(
            "Grid world {}x{}, goal = {:?}, max_steps = {}",
            config.width, config.height, goal, config.max_steps
        );

        Ok(Self {
            config: config.clone(),
            goal,
            pos: (0, 0),
            steps: 0,
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    /// Current cell of the agent.
    pub fn position(&self) -> (usize, usize) {
        self.pos
    }

    /// Goal cell.
    pub fn goal(&self) -> (usize, usize) {
        self.goal
    }

    /// Ticks in the current episode.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn random_cell(&mut self) -> (usize, usize) {
        let (w, h) = (self.config.width, self.config.height);
        loop {
            let ix = self.rng.usize(..w * h);
            let cell = (ix % w, ix / w);
            if cell != self.goal {
                return cell;
            }
        }
    }

    fn move_agent(&mut self, mv: GridMove) {
        let (dx, dy) = mv.delta();
        let x = self.pos.0 as isize + dx;
        let y = self.pos.1 as isize + dy;
        // Moves into the walls keep the agent in place.
        if x >= 0 && y >= 0 && (x as usize) < self.config.width && (y as usize) < self.config.height
        {
            self.pos = (x as usize, y as usize);
        }
    }
}

impl Simulator for GridWorld {
    type NativeAction = GridMove;

    fn native_action_set(&self) -> NativeActionSet<GridMove> {
        NativeActionSet::Discrete(GridMove::iter().collect())
    }

    fn restart_episode(&mut self, _force: bool, phase: RunPhase) -> Result<()> {
        self.pos = match phase {
            RunPhase::Test if self.goal != (0, 0) => (0, 0),
            _ => self.random_cell(),
        };
        self.steps = 0;
        debug!("Start at {:?}", self.pos);
        Ok(())
    }

    fn apply_native_action(
        &mut self,
        action: NativeCommand<'_, GridMove>,
        _phase: RunPhase,
    ) -> Result<f32> {
        let mv = match action {
            NativeCommand::Discrete(mv) => *mv,
            NativeCommand::Continuous(_) => bail!("grid world takes discrete moves only"),
        };
        self.move_agent(mv);
        self.steps += 1;

        Ok(if self.pos == self.goal { 1.0 } else { 0.0 })
    }

    fn report_termination(&self) -> bool {
        self.pos == self.goal || self.steps >= self.config.max_steps
    }

    fn raw_observation(&self) -> Result<Observation> {
        let mut image = ArrayD::zeros(IxDyn(&[self.config.height, self.config.width]));
        image[&[self.goal.1, self.goal.0][..]] = GOAL_VALUE;
        image[&[self.pos.1, self.pos.0][..]] = AGENT_VALUE;
        Ok(Observation::image(image))
    }

    fn measurements_into(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend_from_slice(&[self.pos.0 as f32, self.pos.1 as f32, self.steps as f32]);
    }

    fn rendered_image(&self) -> Option<ArrayD<f32>> {
        let cs = self.config.cell_size;
        let shape = [self.config.height * cs, self.config.width * cs, 3];
        Some(ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
            let cell = (ix[1] / cs, ix[0] / cs);
            let rgb = if cell == self.pos {
                AGENT_RGB
            } else if cell == self.goal {
                GOAL_RGB
            } else {
                BACKGROUND_RGB
            };
            rgb[ix[2]]
        }))
    }

    fn key_bindings(&self) -> KeyBindings {
        GridMove::iter()
            .enumerate()
            .fold(KeyBindings::new(), |bindings, (ix, mv)| {
                let keys = match mv {
                    GridMove::Noop => vec![Key::Space],
                    GridMove::Up => vec![Key::Up, Key::Char('w')],
                    GridMove::Right => vec![Key::Right, Key::Char('d')],
                    GridMove::Left => vec![Key::Left, Key::Char('a')],
                    GridMove::Down => vec![Key::Down, Key::Char('s')],
                };
                bindings.bind(keys, ix)
            })
    }
}
