use super::context::BuildContext;
use anyhow::Result;

pub trait BuildPhase {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut BuildContext<'_>) -> Result<()>;
}
