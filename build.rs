fn main() -> Result<(), Box<dyn std::error::Error>> {
    build_info()?;

    Ok(())
}

// Exposes git and toolchain details to `scc-binding --version`.
fn build_info() -> shadow_rs::SdResult<()> {
    shadow_rs::ShadowBuilder::builder().build()?;
    Ok(())
}
