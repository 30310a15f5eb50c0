use serde::{Deserialize, Serialize};

/// One step of a workflow's step tree.
///
/// The tree is owned by the workflow document; layout only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(flatten)]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Step>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// A plain sequential action.
    Action,
    /// Two-way branch. Either side may be unconfigured.
    Branch {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        success: Option<Box<Step>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        failure: Option<Box<Step>>,
    },
    /// Iterating loop over a nested body chain.
    Loop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Box<Step>>,
    },
}

impl Step {
    pub fn action(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Action,
            next: None,
        }
    }

    pub fn branch(name: impl Into<String>, success: Option<Step>, failure: Option<Step>) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Branch {
                success: success.map(Box::new),
                failure: failure.map(Box::new),
            },
            next: None,
        }
    }

    pub fn looping(name: impl Into<String>, body: Option<Step>) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Loop {
                body: body.map(Box::new),
            },
            next: None,
        }
    }

    /// Append `next` at the end of this step's own chain.
    pub fn then(mut self, next: Step) -> Self {
        let tail = match self.next.take() {
            Some(step) => (*step).then(next),
            None => next,
        };
        self.next = Some(Box::new(tail));
        self
    }

    pub fn next_step(&self) -> Option<&Step> {
        self.next.as_deref()
    }

    /// Number of steps in this subtree, including nested chains.
    pub fn count(&self) -> usize {
        let nested = match &self.kind {
            StepKind::Action => 0,
            StepKind::Branch { success, failure } => {
                success.as_deref().map_or(0, Step::count) + failure.as_deref().map_or(0, Step::count)
            }
            StepKind::Loop { body } => body.as_deref().map_or(0, Step::count),
        };
        1 + nested + self.next_step().map_or(0, Step::count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub trigger: Step,
}

impl Workflow {
    pub fn new(trigger: Step) -> Self {
        Self { trigger }
    }
}

/// Parse a workflow definition. JSON5 is accepted, so plain JSON works too.
pub fn parse_workflow(input: &str) -> anyhow::Result<Workflow> {
    let workflow: Workflow = json5::from_str(input)?;
    Ok(workflow)
}
