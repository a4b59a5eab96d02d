use super::*;
use galleria_core::ProductStatus;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["galleria"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_landing_command() {
    let cli = Cli::try_parse_from(["galleria", "landing"]).expect("expected valid cli args");
    let command = cli.command.expect("command present");
    assert!(matches!(command, Commands::Landing));
    assert_eq!(command.role().unwrap(), PageRole::Landing);
}

#[test]
fn shop_defaults_to_earrings() {
    let cli = Cli::try_parse_from(["galleria", "shop"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Shop { ref category }) if category == "Earrings"
    ));
}

#[test]
fn shop_accepts_all_category() {
    let cli = Cli::try_parse_from(["galleria", "shop", "--category", "ALL"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Shop { ref category }) if category == "ALL"
    ));
}

#[test]
fn cart_add_defaults_quantity_to_one() {
    let cli = Cli::try_parse_from(["galleria", "cart", "add", "--id", "7"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add { ref id, ref qty }
        }) if id == "7" && qty == "1"
    ));
}

#[test]
fn cart_set_accepts_negative_quantity_text() {
    let cli =
        Cli::try_parse_from(["galleria", "cart", "set", "--id", "7", "--qty", "-3"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Set { ref qty, .. }
        }) if qty == "-3"
    ));
}

#[test]
fn cart_commands_map_to_shop_role() {
    let cli = Cli::try_parse_from(["galleria", "cart", "dec", "--id", "7"]).unwrap();
    assert_eq!(cli.command.unwrap().role().unwrap(), PageRole::Shop);
}

#[test]
fn checkout_notes_default_empty() {
    let cli = Cli::try_parse_from([
        "galleria",
        "checkout",
        "--name",
        "Ana",
        "--phone",
        "0917",
        "--address",
        "Cebu",
    ])
    .unwrap();
    let Some(Commands::Checkout { name, notes, .. }) = cli.command else {
        panic!("expected checkout command");
    };
    assert_eq!(name, "Ana");
    assert!(notes.is_empty());
}

#[test]
fn checkout_requires_contact_fields() {
    assert!(Cli::try_parse_from(["galleria", "checkout", "--name", "Ana"]).is_err());
}

#[test]
fn admin_create_collects_images_and_status() {
    let cli = Cli::try_parse_from([
        "galleria",
        "admin",
        "create",
        "--name",
        "Pearl Drop",
        "--price",
        "1450",
        "--status",
        "inactive",
        "--image",
        "https://cdn.example/a.jpg",
        "--image",
        "https://cdn.example/b.jpg",
    ])
    .unwrap();
    let command = cli.command.expect("command present");
    assert_eq!(command.role().unwrap(), PageRole::Admin);
    let Commands::Admin {
        command:
            AdminCommands::Create {
                status,
                images,
                category,
                sold_out,
                ..
            },
    } = command
    else {
        panic!("expected admin create");
    };
    assert_eq!(status, ProductStatus::Inactive);
    assert_eq!(images.len(), 2);
    assert_eq!(category, "Earrings");
    assert!(!sold_out);
}

#[test]
fn admin_create_rejects_unknown_status() {
    let result = Cli::try_parse_from([
        "galleria", "admin", "create", "--name", "X", "--price", "1", "--status", "archived",
    ]);
    assert!(result.is_err());
}

#[test]
fn admin_update_parses_optional_fields() {
    let cli = Cli::try_parse_from([
        "galleria",
        "admin",
        "update",
        "--id",
        "42",
        "--sold-out",
        "true",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Update {
                ref id,
                sold_out: Some(true),
                name: None,
                price: None,
                ..
            }
        }) if id == "42"
    ));
}

#[test]
fn admin_delete_confirmation_flag() {
    let cli = Cli::try_parse_from(["galleria", "admin", "delete", "--id", "9"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Delete { yes: false, .. }
        })
    ));

    let cli = Cli::try_parse_from(["galleria", "admin", "delete", "--id", "9", "--yes"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Delete { yes: true, .. }
        })
    ));
}

#[test]
fn admin_upload_requires_files() {
    assert!(Cli::try_parse_from(["galleria", "admin", "upload"]).is_err());
    let cli = Cli::try_parse_from(["galleria", "admin", "upload", "a.jpg", "b.png"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Upload { ref files }
        }) if files.len() == 2
    ));
}

#[test]
fn help_exits_during_argument_parsing() {
    let err = Cli::try_parse_from(["galleria", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(["galleria", "admin", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn every_role_attribute_parses() {
    for (args, role) in [
        (vec!["galleria", "landing"], PageRole::Landing),
        (
            vec![
                "galleria", "checkout", "--name", "A", "--phone", "1", "--address", "C",
            ],
            PageRole::Shop,
        ),
        (vec!["galleria", "admin", "list"], PageRole::Admin),
    ] {
        let command = Cli::try_parse_from(args).unwrap().command.unwrap();
        assert_eq!(command.role().unwrap(), role);
    }
}
