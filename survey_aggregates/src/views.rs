// The chart currently on display, and how the navigation moves between charts.

use log::debug;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum View {
    Donut,
    Chord,
    StackedBar,
}

impl View {
    /// All the views, in navigation order.
    pub const ALL: [View; 3] = [View::Donut, View::Chord, View::StackedBar];

    pub fn index(&self) -> usize {
        match self {
            View::Donut => 0,
            View::Chord => 1,
            View::StackedBar => 2,
        }
    }

    /// Wraps around: any index maps to a view.
    pub fn from_index(idx: usize) -> View {
        View::ALL[idx % View::ALL.len()]
    }

    pub fn from_name(name: &str) -> Option<View> {
        match name.trim().to_lowercase().as_str() {
            "donut" => Some(View::Donut),
            "chord" => Some(View::Chord),
            "bar" | "stacked_bar" | "stackedbar" => Some(View::StackedBar),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Donut => "donut",
            View::Chord => "chord",
            View::StackedBar => "bar",
        }
    }
}

/// Navigation state between the charts.
///
/// The state is owned by the caller and only moves on explicit next/previous
/// requests. Each transition means the previous scene is thrown away and the
/// new one rendered from scratch with [`crate::scene::render`].
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ViewCycle {
    current: View,
}

impl Default for ViewCycle {
    fn default() -> Self {
        ViewCycle::new()
    }
}

impl ViewCycle {
    pub fn new() -> ViewCycle {
        ViewCycle {
            current: View::Donut,
        }
    }

    pub fn starting_at(view: View) -> ViewCycle {
        ViewCycle { current: view }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn next(&mut self) -> View {
        let n = View::ALL.len();
        self.current = View::from_index((self.current.index() + 1) % n);
        debug!("ViewCycle::next: {:?}", self.current);
        self.current
    }

    pub fn previous(&mut self) -> View {
        let n = View::ALL.len();
        self.current = View::from_index((self.current.index() + n - 1) % n);
        debug!("ViewCycle::previous: {:?}", self.current);
        self.current
    }
}
