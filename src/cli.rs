use clap::Parser;

#[derive(Parser)]
#[command(name = "labstrap")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Bootstrap this host and provision the k3s lab with Ansible",
    long_about = "Installs Ansible if missing, installs the collections from requirements.yml \
                  (or kubernetes.core), checks that site.yml and inventory.ini exist next to \
                  this executable, then runs ansible-playbook once and exits with its status."
)]
pub struct Cli {}
