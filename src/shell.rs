//! Interactive session: one page, driven line by line

use swan_registry::controller::DeviceRegistryClient;
use swan_registry::page::TerminalPage;

use crate::cli::parse_field;

const HELP: &str = "\
Commands:
  list                    reload the device list
  add [NAME=VALUE ...]    fill the form and submit it; bare 'add' submits
                          the form as it stands
  open <n>                show details of list entry n
  delete                  delete the device currently shown
  help                    this text
  quit                    leave";

pub async fn run(client: &DeviceRegistryClient, page: &TerminalPage) {
    page.print("swanctl shell, 'help' for commands");
    client.refresh_list().await;

    loop {
        page.prompt("swan> ");
        let Some(line) = page.read_line() else {
            break;
        };

        let mut words = line.split_whitespace();
        match words.next() {
            None => continue,
            Some("quit" | "exit") => break,
            Some("help") => page.print(HELP),
            Some("list") => {
                client.refresh_list().await;
            }
            Some("add") => {
                let fields: Result<Vec<_>, _> = words.map(parse_field).collect();
                match fields {
                    Ok(fields) => {
                        if !fields.is_empty() {
                            page.fill(fields);
                        }
                        client.submit_form().await;
                    }
                    Err(e) => page.print(&e),
                }
            }
            Some("open") => {
                let action = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| page.entry_action(n));
                match action {
                    Some(action) => {
                        client.dispatch(&action).await;
                    }
                    None => page.print("No such entry; 'list' shows the numbers"),
                }
            }
            Some("delete") => match page.delete_action() {
                Some(action) => {
                    client.dispatch(&action).await;
                }
                None => page.print("No device shown; 'open <n>' first"),
            },
            Some(other) => page.print(&format!("Unknown command '{}', try 'help'", other)),
        }

        // A reload rebuilds the page from scratch.
        if page.take_reload() {
            page.clear_details();
            client.refresh_list().await;
        }
    }
}
