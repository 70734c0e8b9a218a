//! Example: Declarative Login Form Page Object
//!
//! Demonstrates: field declaration, generated accessors, scoped regions
//!
//! Run with: `cargo run --example login_form`

use std::sync::Arc;

use pagina::{Driver, MockDriver, MockElement, Page, PaginaResult, Region, Registry, Selector};

fn main() -> PaginaResult<()> {
    println!("=== Declarative Page Object Example ===\n");

    // 1. Declare the page's fields once, per type.
    println!("1. Declaring the login page fields...");
    let login_registry = Registry::builder()
        .text_field("username", Selector::id("username"))
        .text_field("password", Selector::id("password"))
        .checkbox("remember_me", Selector::name("remember"))
        .button("login", Selector::css("button[type='submit']"))
        .span("error_message", Selector::css(".error-message"))
        .build()?;
    println!("   Fields: {}", login_registry.len());

    // 2. Wire up a mock page (a real suite would plug in a browser driver).
    let driver = Arc::new(MockDriver::new());
    let _ = driver.install(Selector::id("username"), MockElement::new("input"));
    let _ = driver.install(Selector::id("password"), MockElement::new("input"));
    let _ = driver.install(Selector::name("remember"), MockElement::new("input"));
    let _ = driver.install(
        Selector::css("button[type='submit']"),
        MockElement::new("button"),
    );
    let page = Page::new(
        Arc::clone(&driver) as Arc<dyn Driver>,
        Arc::clone(&login_registry),
    );

    // 3. Generated accessors: one bundle per declared field.
    println!("\n2. Using generated accessors...");
    page.field("username")?.set_value("ada")?;
    page.field("password")?.set_value("hunter2")?;
    page.field("remember_me")?.check()?;
    page.field("login")?.click()?;
    println!("   username = {}", page.field("username")?.value()?);
    println!("   remember_me = {}", page.field("remember_me")?.checked()?);

    // 4. The per-kind operation bundle is introspectable.
    println!("\n3. Operations generated per field...");
    for name in ["username", "remember_me", "login"] {
        let accessor = page.field(name)?;
        let ops: Vec<&str> = accessor
            .operations()
            .iter()
            .map(|op| op.as_str())
            .collect();
        println!("   {name}: {}", ops.join(", "));
    }

    // 5. Generic form filling over the settable subset.
    println!("\n4. Form filling...");
    println!("   settable: {:?}", page.settable_fields());
    page.populate([("username", "grace"), ("remember_me", "false")])?;
    println!("   username = {}", page.field("username")?.value()?);

    // 6. Scoped regions: the same definition over repeated fragments.
    println!("\n5. Scoped regions...");
    let row_registry = Registry::builder()
        .text_field("answer", Selector::name("answer"))
        .build()?;
    for id in ["row-1", "row-2"] {
        let container = driver.install(Selector::id(id), MockElement::new("div"));
        let _ = driver.install_within(
            &container,
            Selector::name("answer"),
            MockElement::new("input"),
        );
        let region = Region::builder()
            .context(&page)
            .container(container)
            .registry(Arc::clone(&row_registry))
            .build()?;
        region.field("answer")?.set_value(id)?;
        println!("   {id}: answer = {}", region.field("answer")?.value()?);
    }

    // 7. Existence checks never error.
    println!("\n6. Existence checks...");
    println!(
        "   error_message exists: {}",
        page.field("error_message")?.exists()
    );

    println!("\nDone.");
    Ok(())
}
