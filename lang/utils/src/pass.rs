/// One stage of the compilation pipeline.
///
/// A pass first gets to look at the whole input through [`CompilerPass::init`]
/// and is then asked to transform it with [`CompilerPass::run`]. The pipeline
/// stops at the first error returned by either.
pub trait CompilerPass {
    type Input;
    type Output;
    type Error;
    /// Whole-program pre-scan; most passes have nothing to collect.
    fn init(&mut self, _input: &Self::Input) -> Result<(), Self::Error> {
        Ok(())
    }
    fn run(&mut self, input: Self::Input) -> Result<Self::Output, Self::Error>;
}
