//! `page-client <books|customers>`: the management page, driven from a terminal.

use async_trait::async_trait;
use doc_crud::client::render::{to_html, to_text};
use doc_crud::client::{
    Confirmation, HttpResourceApi, Mode, Notice, NoticeKind, PageController, Prompter,
};
use doc_crud::infra::{config, logging};
use doc_crud::resource_by_name;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

type InputLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: page-client <books|customers>\n\
         \n\
         Env vars (all optional):\n\
           <RESOURCE>_API_URL (default http://localhost:<port>/<resource>), RUST_LOG\n"
    );
    std::process::exit(2);
}

const HELP: &str = "\
Commands:
  list                  reload and show the table
  set <field> <value>   fill a form input
  submit                save the form (create or update)
  edit <id>             load a record into the form
  delete <id>           delete a record
  clear                 empty the form, back to create mode
  new                   same as clear
  html                  print the table body as HTML
  help                  this text
  quit";

struct TerminalPrompter {
    input: InputLines,
}

async fn next_line(input: &InputLines) -> Option<String> {
    input.lock().await.next_line().await.ok().flatten()
}

fn prompt(text: &str) {
    print!("{}", text);
    std::io::stdout().flush().ok();
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, confirmation: &Confirmation) -> bool {
        println!("{}", confirmation.title);
        if let Some(text) = &confirmation.text {
            println!("  {}", text);
        }
        prompt(&format!(
            "[y] {} / [N] {}: ",
            confirmation.confirm_label, confirmation.cancel_label
        ));
        matches!(
            next_line(&self.input).await.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => println!("[ok] {}: {}", notice.title, notice.text),
            NoticeKind::Error => println!("[error] {}: {}", notice.title, notice.text),
        }
    }
}

fn show_form(page: &PageController<HttpResourceApi, TerminalPrompter>) {
    let view = page.view();
    match &view.mode {
        Mode::Create => println!("Form (new {}):", page.model().singular()),
        Mode::Edit(id) => println!("Form (editing {}):", id),
    }
    for field in page.model().fields() {
        let value = view.form.get(field.name).unwrap_or_default();
        let marker = if field.required { "*" } else { " " };
        println!("  {}{:<12} {}", marker, field.name, value);
    }
    println!("  [{}]", view.submit_label());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let Some(model) = args.first().and_then(|name| resource_by_name(name)) else {
        usage_and_exit();
    };

    let api_url = config::api_url(model.as_ref());
    println!("> {} page ({})", model.model_name(), api_url);

    let input: InputLines = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let prompter = TerminalPrompter {
        input: input.clone(),
    };
    let mut page = PageController::new(model.clone(), HttpResourceApi::new(api_url), prompter);

    page.refresh().await;
    print!("{}", to_text(model.as_ref(), &page.view().rows));
    println!("{}", HELP);

    loop {
        prompt("> ");
        let Some(line) = next_line(&input).await else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "list" => {
                page.refresh().await;
                print!("{}", to_text(model.as_ref(), &page.view().rows));
            }
            "set" => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if !page.set_field(field, value.trim()) {
                    println!("Unknown field {:?}", field);
                }
                show_form(&page);
            }
            "submit" => {
                page.submit().await;
                print!("{}", to_text(model.as_ref(), &page.view().rows));
            }
            "edit" if !rest.is_empty() => {
                page.edit(rest).await;
                show_form(&page);
            }
            "delete" if !rest.is_empty() => {
                page.delete(rest).await;
                print!("{}", to_text(model.as_ref(), &page.view().rows));
            }
            "clear" | "new" => {
                page.clear();
                show_form(&page);
            }
            "html" => print!("{}", to_html(&page.view().rows)),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            _ => println!("Unknown command {:?} (try `help`)", line),
        }
    }

    Ok(())
}
